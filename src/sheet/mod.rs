//! Sheet-shaped table model: named sheets of positioned, styled rows.

pub mod cell;
mod format;
mod row;
mod schema;

pub use cell::Cell;
pub use format::{format_table, GridRange, TableFormat, BAND_COLOR};
pub use row::{Row, RowKind, RowStyle};
pub use schema::SheetName;

/// A sheet as loaded from the store.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
    pub format: Option<TableFormat>,
}

impl Sheet {
    /// The first stored row, which holds the field names.
    pub fn header(&self) -> Option<&Row> {
        self.rows.iter().min_by_key(|r| r.index)
    }
}
