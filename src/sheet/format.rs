//! Presentation pass applied to a sheet after every bulk write.
//!
//! Produces a [`TableFormat`] describing column widths, the frozen header,
//! the grid border and the zebra banding. Row data is never touched.

use serde::{Deserialize, Serialize};

use super::row::Row;

/// Tint applied to every second row.
pub const BAND_COLOR: &str = "#F9FAFB";

/// Occupied region a grid border is drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRange {
    pub rows: usize,
    pub columns: usize,
}

/// Sheet-level presentation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFormat {
    pub frozen_rows: usize,
    /// Width of each column in characters, first column first.
    pub column_widths: Vec<usize>,
    pub border: Option<GridRange>,
    /// Absolute row positions carrying the band tint.
    pub banded_rows: Vec<usize>,
    pub band_color: String,
    /// 1-based columns whose data is centre-aligned.
    #[serde(default)]
    pub centered_columns: Vec<usize>,
}

impl TableFormat {
    pub fn with_centered_column(mut self, column: usize) -> Self {
        if !self.centered_columns.contains(&column) {
            self.centered_columns.push(column);
        }
        self
    }
}

/// Compute the presentation of a sheet from its rows.
///
/// Banding goes by absolute row position: every even position from 2 up to
/// the last row is tinted, gap positions included.
pub fn format_table(rows: &[Row]) -> TableFormat {
    let last_row = rows.iter().map(|r| r.index).max().unwrap_or(0);
    let last_column = rows.iter().map(Row::width).max().unwrap_or(0);

    let mut column_widths = vec![0; last_column];
    for row in rows.iter().filter(|r| r.style.merge_columns.is_none()) {
        for (column, width) in column_widths.iter_mut().enumerate() {
            *width = (*width).max(row.text_at(column).chars().count());
        }
    }

    let border = (last_row > 0 && last_column > 0).then_some(GridRange {
        rows: last_row,
        columns: last_column,
    });

    let banded_rows = if last_row > 1 {
        (2..=last_row).filter(|i| i % 2 == 0).collect()
    } else {
        Vec::new()
    };

    TableFormat {
        frozen_rows: 1,
        column_widths,
        border,
        banded_rows,
        band_color: BAND_COLOR.to_string(),
        centered_columns: Vec::new(),
    }
}
