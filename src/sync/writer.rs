//! Write path: replaces every sheet wholesale from a submitted snapshot.

use chrono::{DateTime, Local, Utc};
use sqlx::SqliteConnection;

use super::dashboard::DashboardStats;
use super::SyncError;
use crate::db::{clear_sheet, ensure_sheet, set_format, write_rows, SheetStore};
use crate::models::{AdminCredential, MissingField, SheetRecord, Snapshot};
use crate::sheet::{format_table, Cell, Row, RowKind, RowStyle, SheetName};

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    pub synced_at: DateTime<Utc>,
    /// Data rows written per source sheet.
    pub records: Vec<(SheetName, usize)>,
}

/// Parses `payload` as a JSON snapshot and applies it.
pub async fn write_snapshot(
    store: &SheetStore,
    payload: impl AsRef<[u8]>,
) -> Result<SyncSummary, SyncError> {
    let snapshot: Snapshot =
        serde_json::from_slice(payload.as_ref()).map_err(SyncError::InvalidPayload)?;
    apply_snapshot(store, &snapshot, Utc::now()).await
}

/// Replaces all sheets with the contents of `snapshot`.
///
/// Runs in one transaction; on error nothing is changed.
pub async fn apply_snapshot(
    store: &SheetStore,
    snapshot: &Snapshot,
    now: DateTime<Utc>,
) -> Result<SyncSummary, SyncError> {
    let mut tx = store.begin().await?;

    let seeded;
    let admins: &[AdminCredential] = if snapshot.admin_credentials.is_empty() {
        tracing::info!("No admin credentials submitted, seeding default admin");
        seeded = [AdminCredential::default_admin(now)];
        &seeded
    } else {
        &snapshot.admin_credentials
    };

    let records = vec![
        replace_records(&mut tx, &snapshot.students).await?,
        replace_records(&mut tx, &snapshot.payments).await?,
        replace_records(&mut tx, &snapshot.courses).await?,
        replace_records(&mut tx, &snapshot.batches).await?,
        replace_records(&mut tx, admins).await?,
        replace_records(&mut tx, &snapshot.student_credentials).await?,
    ];

    let stats = DashboardStats::from_snapshot(snapshot);
    replace_sheet(
        &mut tx,
        SheetName::Dashboard,
        &stats.rows(&now.with_timezone(&Local)),
        None,
    )
    .await?;

    tx.commit().await?;

    for (sheet, count) in &records {
        tracing::debug!("Wrote {} row(s) to {}", count, sheet);
    }
    tracing::info!(
        "Synced {} student(s), {} payment(s); collection rate {}",
        stats.total_students,
        stats.total_transactions,
        stats.collection_rate()
    );

    Ok(SyncSummary {
        synced_at: now,
        records,
    })
}

/// Creates every sheet and resets the admin sheet to the default account.
pub async fn initialize(store: &SheetStore, now: DateTime<Utc>) -> Result<(), SyncError> {
    let mut tx = store.begin().await?;

    for sheet in SheetName::ALL {
        ensure_sheet(&mut tx, sheet).await?;
    }
    replace_records(&mut tx, &[AdminCredential::default_admin(now)]).await?;

    tx.commit().await?;
    tracing::info!("Initialized {} sheets", SheetName::ALL.len());
    Ok(())
}

/// Header, one data row per record, and the sheet's annotation if any.
///
/// Data starts at row 2. The annotation sits at `records + 3`, leaving one
/// blank row below the data.
pub fn table_rows<R: SheetRecord>(records: &[R]) -> Result<Vec<Row>, MissingField> {
    let headers = R::SHEET.headers();
    let mut rows = Vec::with_capacity(records.len() + 2);
    rows.push(Row::header(headers, R::SHEET.header_color()));

    for (i, record) in records.iter().enumerate() {
        rows.push(Row::new(i + 2, RowKind::Data, record.to_cells()?));
    }

    if let Some(annotation) = R::annotation() {
        rows.push(
            Row::new(
                records.len() + 3,
                RowKind::Annotation,
                vec![Cell::from(annotation.text)],
            )
            .with_style(RowStyle::notice(annotation.background, headers.len())),
        );
    }

    Ok(rows)
}

async fn replace_records<R: SheetRecord>(
    conn: &mut SqliteConnection,
    records: &[R],
) -> Result<(SheetName, usize), SyncError> {
    let rows = table_rows(records)?;
    let centered = R::centered_column().filter(|_| !records.is_empty());
    replace_sheet(conn, R::SHEET, &rows, centered).await?;
    Ok((R::SHEET, records.len()))
}

async fn replace_sheet(
    conn: &mut SqliteConnection,
    sheet: SheetName,
    rows: &[Row],
    centered_column: Option<usize>,
) -> Result<(), sqlx::Error> {
    ensure_sheet(conn, sheet).await?;
    clear_sheet(conn, sheet).await?;
    write_rows(conn, sheet, rows).await?;

    let mut format = format_table(rows);
    if let Some(column) = centered_column {
        format = format.with_centered_column(column);
    }
    set_format(conn, sheet, &format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::{Payment, StudentCredential};
    use serde_json::json;
    use tempfile::TempDir;

    struct TestContext {
        store: SheetStore,
        _temp_dir: TempDir,
    }

    async fn setup_store() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        TestContext {
            store: SheetStore::new(pool),
            _temp_dir: temp_dir,
        }
    }

    fn full_payload() -> String {
        json!({
            "students": [
                {"id": "S1", "name": "Asha", "phone": "9000000001", "course": "C1",
                 "totalFee": 10000, "paidAmount": 10000, "pending": 0},
                {"id": "S2", "name": "Ravi", "phone": "9000000002",
                 "totalFee": 10000, "paidAmount": 4000, "pending": 6000}
            ],
            "payments": [
                {"id": 123456789, "date": "2025-02-01", "studentId": "S1", "amount": 10000, "method": "Cash"}
            ],
            "courses": [{"id": "C1", "name": "Web Design", "duration": 6, "fee": 9000, "regFee": 1000}],
            "batches": [{"id": "B1", "name": "Morning", "courseId": "C1", "startDate": "2025-01-06"}],
            "studentCredentials": [{"id": "S1", "password": "9000000001", "name": "Asha"}]
        })
        .to_string()
    }

    #[test]
    fn test_table_rows_without_annotation() {
        let payments: Vec<Payment> =
            serde_json::from_value(json!([{"id": "P1"}, {"id": "P2"}])).unwrap();
        let rows = table_rows(&payments).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, RowKind::Header);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[2].index, 3);
        assert_eq!(rows[2].cells[6], json!("RCPP2"));
    }

    #[test]
    fn test_annotation_leaves_blank_row() {
        let rows = table_rows::<StudentCredential>(&[]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].index, 3);
        assert_eq!(rows[1].kind, RowKind::Annotation);
        assert_eq!(rows[1].style.merge_columns, Some(7));
    }

    #[tokio::test]
    async fn test_write_replaces_all_sheets() {
        let ctx = setup_store().await;
        let summary = write_snapshot(&ctx.store, &full_payload()).await.unwrap();

        assert_eq!(summary.records[0], (SheetName::Students, 2));
        assert_eq!(summary.records[4], (SheetName::AdminManage, 1));

        let names = ctx.store.sheet_names().await.unwrap();
        assert_eq!(names.len(), 7);

        let students = ctx.store.load(SheetName::Students).await.unwrap().unwrap();
        assert_eq!(students.rows.len(), 3);
        assert_eq!(students.rows[1].cells[10], json!("Paid"));
        assert_eq!(students.rows[2].cells[10], json!("Partial"));
        assert_eq!(students.format.unwrap().centered_columns, vec![11]);

        let courses = ctx.store.load(SheetName::Courses).await.unwrap().unwrap();
        assert_eq!(courses.rows[1].cells[5], json!(10000));
    }

    #[tokio::test]
    async fn test_second_write_fully_replaces_first() {
        let ctx = setup_store().await;
        write_snapshot(&ctx.store, &full_payload()).await.unwrap();
        write_snapshot(&ctx.store, r#"{"students": [{"id": "S9"}]}"#)
            .await
            .unwrap();

        let students = ctx.store.load(SheetName::Students).await.unwrap().unwrap();
        assert_eq!(students.rows.len(), 2);
        assert_eq!(students.rows[1].cells[0], json!("S9"));

        let payments = ctx.store.load(SheetName::Payments).await.unwrap().unwrap();
        assert_eq!(payments.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_admins_seed_default() {
        let ctx = setup_store().await;
        write_snapshot(&ctx.store, r#"{"adminCredentials": []}"#)
            .await
            .unwrap();

        let admins = ctx.store.load(SheetName::AdminManage).await.unwrap().unwrap();
        let data: Vec<&Row> = admins
            .rows
            .iter()
            .filter(|r| r.kind == RowKind::Data)
            .collect();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].cells[0], json!("admin"));
        assert_eq!(data[0].cells[4], json!("Super Admin"));
        assert_eq!(data[0].cells[6], json!("Active"));

        let note = admins.rows.last().unwrap();
        assert_eq!(note.kind, RowKind::Annotation);
        assert_eq!(note.index, 4);
    }

    #[tokio::test]
    async fn test_dashboard_from_submitted_snapshot() {
        let ctx = setup_store().await;
        write_snapshot(&ctx.store, &full_payload()).await.unwrap();

        let dashboard = ctx.store.load(SheetName::Dashboard).await.unwrap().unwrap();
        let rate = dashboard.rows.iter().find(|r| r.index == 12).unwrap();
        assert_eq!(rate.cells, vec![json!("Collection Rate"), json!("70.00%")]);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_an_error() {
        let ctx = setup_store().await;
        let err = write_snapshot(&ctx.store, "not json").await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidPayload(_)));
        assert!(!err.to_string().is_empty());
        assert!(ctx.store.sheet_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let ctx = setup_store().await;
        write_snapshot(&ctx.store, &full_payload()).await.unwrap();

        let err = write_snapshot(
            &ctx.store,
            r#"{"students": [{"id": "S5"}], "payments": [{"amount": 100}]}"#,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SyncError::MissingField(_)));

        let students = ctx.store.load(SheetName::Students).await.unwrap().unwrap();
        assert_eq!(students.rows.len(), 3);
        assert_eq!(students.rows[1].cells[0], json!("S1"));
    }

    #[tokio::test]
    async fn test_initialize_creates_sheets_and_admin() {
        let ctx = setup_store().await;
        initialize(&ctx.store, Utc::now()).await.unwrap();

        let names = ctx.store.sheet_names().await.unwrap();
        assert_eq!(
            names,
            SheetName::ALL.iter().map(|s| s.title()).collect::<Vec<_>>()
        );

        let admins = ctx.store.load(SheetName::AdminManage).await.unwrap().unwrap();
        assert_eq!(admins.rows[1].cells[0], json!("admin"));

        let students = ctx.store.load(SheetName::Students).await.unwrap().unwrap();
        assert!(students.rows.is_empty());
    }
}
