mod batch;
mod course;
mod credential;
mod payment;
mod snapshot;
mod student;

pub use batch::Batch;
pub use course::Course;
pub use credential::{AdminCredential, StudentCredential};
pub use payment::Payment;
pub use snapshot::{Record, Snapshot, SnapshotView};
pub use student::{PaymentStatus, Student};

use std::fmt;

use crate::sheet::{Cell, SheetName};

/// A notice placed below a sheet's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub text: &'static str,
    pub background: &'static str,
}

/// A client record that lays out as one data row of a fixed sheet.
pub trait SheetRecord {
    const SHEET: SheetName;

    /// Cells in header order, defaults substituted.
    fn to_cells(&self) -> Result<Vec<Cell>, MissingField>;

    /// Notice written below the data, if the sheet carries one.
    fn annotation() -> Option<Annotation> {
        None
    }

    /// 1-based column whose data is centre-aligned.
    fn centered_column() -> Option<usize> {
        None
    }
}

/// A record lacks a field its row cannot be built without.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub sheet: SheetName,
    pub field: &'static str,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record is missing required field '{}'", self.sheet, self.field)
    }
}

impl std::error::Error for MissingField {}
