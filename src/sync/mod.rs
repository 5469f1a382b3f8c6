//! Snapshot synchronization between clients and the sheet store.

pub mod dashboard;
mod error;
mod reader;
mod response;
mod writer;

pub use dashboard::{DashboardStats, DashboardView, Metric};
pub use error::SyncError;
pub use reader::{read_dashboard, read_snapshot, records_from_sheet};
pub use response::{SyncFailure, SyncSuccess, SYNC_MESSAGE};
pub use writer::{apply_snapshot, initialize, table_rows, write_snapshot, SyncSummary};

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO 8601 in UTC with millisecond precision, e.g. `2025-03-01T10:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
