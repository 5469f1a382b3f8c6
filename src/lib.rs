//! Feesync Library
//!
//! Keeps a fee-management client's students, payments, courses, batches and
//! login records in a sheet-shaped SQLite store. Clients push a full
//! snapshot, which replaces every sheet and recomputes the dashboard, and
//! pull the stored sheets back as a snapshot.

pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod server;
pub mod sheet;
pub mod sync;

pub use client::{ClientError, SyncClient};
pub use config::{Config, ConfigError};
pub use db::{init_db, SheetStore};
pub use models::{Snapshot, SnapshotView};
pub use sync::{read_snapshot, write_snapshot, SyncError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
