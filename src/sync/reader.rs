//! Read path: rebuilds a snapshot from the stored sheets.
//!
//! Field names come from each sheet's stored header row. Only data rows
//! become records; headers, notices and blank rows are skipped.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use super::dashboard::DashboardView;
use super::{iso_timestamp, SyncError};
use crate::db::{load_sheet, SheetStore};
use crate::models::{Record, SnapshotView};
use crate::sheet::cell::{self, Cell};
use crate::sheet::{RowKind, Sheet, SheetName};

/// Reads every source sheet. `lastSync` is the time of this read.
pub async fn read_snapshot(
    store: &SheetStore,
    now: DateTime<Utc>,
) -> Result<SnapshotView, SyncError> {
    let mut conn = store.pool().acquire().await?;

    let view = SnapshotView {
        students: read_records(&mut conn, SheetName::Students).await?,
        payments: read_records(&mut conn, SheetName::Payments).await?,
        courses: read_records(&mut conn, SheetName::Courses).await?,
        batches: read_records(&mut conn, SheetName::Batches).await?,
        admin_credentials: read_records(&mut conn, SheetName::AdminManage).await?,
        student_credentials: read_records(&mut conn, SheetName::StudentManage).await?,
        last_sync: iso_timestamp(now),
    };

    tracing::debug!(
        "Read snapshot: {} student(s), {} payment(s)",
        view.students.len(),
        view.payments.len()
    );
    Ok(view)
}

/// Reads the stored dashboard, empty if no sync has happened yet.
pub async fn read_dashboard(store: &SheetStore) -> Result<DashboardView, SyncError> {
    Ok(store
        .load(SheetName::Dashboard)
        .await?
        .map(|sheet| DashboardView::from_rows(&sheet.rows))
        .unwrap_or_default())
}

async fn read_records(
    conn: &mut SqliteConnection,
    sheet: SheetName,
) -> Result<Vec<Record>, sqlx::Error> {
    Ok(load_sheet(conn, sheet)
        .await?
        .map(|sheet| records_from_sheet(&sheet))
        .unwrap_or_default())
}

/// One record per data row, keyed by the header row's text.
///
/// A sheet with at most one row has no records. Cells missing from a short
/// row read as empty.
pub fn records_from_sheet(sheet: &Sheet) -> Vec<Record> {
    if sheet.rows.len() <= 1 {
        return Vec::new();
    }
    let Some(header) = sheet.header() else {
        return Vec::new();
    };
    let names: Vec<String> = header.cells.iter().map(cell::text).collect();

    sheet
        .rows
        .iter()
        .filter(|row| row.kind == RowKind::Data && row.index > header.index)
        .map(|row| {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value: Cell = row.cells.get(i).cloned().unwrap_or_else(cell::blank);
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}
