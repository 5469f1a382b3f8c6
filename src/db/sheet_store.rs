use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::str::FromStr;

use crate::sheet::{Row, RowKind, RowStyle, Sheet, SheetName, TableFormat};

/// Handle to the sheet tables.
///
/// Reads go through the pool; writes are made on a connection (usually a
/// transaction from [`SheetStore::begin`]) with the free functions below.
#[derive(Debug, Clone)]
pub struct SheetStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct SheetEntry {
    name: String,
    format: Option<String>,
}

#[derive(sqlx::FromRow)]
struct RowRecord {
    row_index: i64,
    kind: String,
    cells: String,
    style: String,
}

fn decode_error(e: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}

impl SheetStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Loads a sheet, or `None` if it has never been created.
    pub async fn load(&self, sheet: SheetName) -> Result<Option<Sheet>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        load_sheet(&mut conn, sheet).await
    }

    /// Titles of all existing sheets in tab order.
    pub async fn sheet_names(&self) -> Result<Vec<String>, sqlx::Error> {
        let names: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sheets ORDER BY position, name")
                .fetch_all(&self.pool)
                .await?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}

/// Creates the sheet if it does not exist yet.
pub async fn ensure_sheet(conn: &mut SqliteConnection, sheet: SheetName) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO sheets (name, position, created_at) VALUES (?, ?, ?)")
        .bind(sheet.title())
        .bind(sheet.position())
        .bind(Utc::now().to_rfc3339())
        .execute(conn)
        .await?;
    Ok(())
}

/// Removes every row and the presentation state of a sheet.
pub async fn clear_sheet(conn: &mut SqliteConnection, sheet: SheetName) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sheet_rows WHERE sheet = ?")
        .bind(sheet.title())
        .execute(&mut *conn)
        .await?;
    sqlx::query("UPDATE sheets SET format = NULL WHERE name = ?")
        .bind(sheet.title())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Writes rows at their positions, replacing whatever sits there.
pub async fn write_rows(
    conn: &mut SqliteConnection,
    sheet: SheetName,
    rows: &[Row],
) -> Result<(), sqlx::Error> {
    for row in rows {
        let cells = serde_json::to_string(&row.cells).map_err(decode_error)?;
        let style = serde_json::to_string(&row.style).map_err(decode_error)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sheet_rows (sheet, row_index, kind, cells, style)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sheet.title())
        .bind(row.index as i64)
        .bind(row.kind.to_string())
        .bind(&cells)
        .bind(&style)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Stores the presentation state of a sheet.
pub async fn set_format(
    conn: &mut SqliteConnection,
    sheet: SheetName,
    format: &TableFormat,
) -> Result<(), sqlx::Error> {
    let format = serde_json::to_string(format).map_err(decode_error)?;
    sqlx::query("UPDATE sheets SET format = ? WHERE name = ?")
        .bind(&format)
        .bind(sheet.title())
        .execute(conn)
        .await?;
    Ok(())
}

/// Loads a sheet with its rows in position order.
pub async fn load_sheet(
    conn: &mut SqliteConnection,
    sheet: SheetName,
) -> Result<Option<Sheet>, sqlx::Error> {
    let record: Option<SheetEntry> =
        sqlx::query_as("SELECT name, format FROM sheets WHERE name = ?")
            .bind(sheet.title())
            .fetch_optional(&mut *conn)
            .await?;

    let Some(record) = record else {
        return Ok(None);
    };

    let rows: Vec<RowRecord> = sqlx::query_as(
        "SELECT row_index, kind, cells, style FROM sheet_rows WHERE sheet = ? ORDER BY row_index",
    )
    .bind(sheet.title())
    .fetch_all(&mut *conn)
    .await?;

    let rows = rows
        .into_iter()
        .map(hydrate_row)
        .collect::<Result<Vec<_>, _>>()?;

    let format = record
        .format
        .as_deref()
        .map(serde_json::from_str::<TableFormat>)
        .transpose()
        .map_err(decode_error)?;

    Ok(Some(Sheet {
        name: record.name,
        rows,
        format,
    }))
}

fn hydrate_row(record: RowRecord) -> Result<Row, sqlx::Error> {
    let kind = RowKind::from_str(&record.kind).map_err(|e| sqlx::Error::Decode(e.into()))?;
    let cells = serde_json::from_str(&record.cells).map_err(decode_error)?;
    let style: RowStyle = serde_json::from_str(&record.style).map_err(decode_error)?;

    Ok(Row {
        index: record.row_index.max(0) as usize,
        kind,
        cells,
        style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::sheet::format_table;
    use serde_json::json;
    use tempfile::TempDir;

    struct TestContext {
        store: SheetStore,
        _temp_dir: TempDir, // Keep alive for duration of test
    }

    async fn setup_store() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(&db_path).await.unwrap();
        TestContext {
            store: SheetStore::new(pool),
            _temp_dir: temp_dir,
        }
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            Row::header(SheetName::Batches.headers(), SheetName::Batches.header_color()),
            Row::new(
                2,
                RowKind::Data,
                vec![json!("B1"), json!("Morning"), json!("C1"), json!("2025-01-06"), json!(""), json!(12)],
            ),
        ]
    }

    #[tokio::test]
    async fn test_missing_sheet_loads_as_none() {
        let ctx = setup_store().await;
        assert!(ctx.store.load(SheetName::Batches).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_and_load_rows() {
        let ctx = setup_store().await;
        let mut tx = ctx.store.begin().await.unwrap();
        ensure_sheet(&mut tx, SheetName::Batches).await.unwrap();
        write_rows(&mut tx, SheetName::Batches, &sample_rows())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let sheet = ctx.store.load(SheetName::Batches).await.unwrap().unwrap();
        assert_eq!(sheet.name, "Batches");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].kind, RowKind::Header);
        assert_eq!(sheet.rows[0].style.background.as_deref(), Some("#8B5CF6"));
        assert_eq!(sheet.rows[1].cells[5], json!(12));
        assert!(sheet.format.is_none());
    }

    #[tokio::test]
    async fn test_clear_sheet_drops_rows_and_format() {
        let ctx = setup_store().await;
        let rows = sample_rows();

        let mut tx = ctx.store.begin().await.unwrap();
        ensure_sheet(&mut tx, SheetName::Batches).await.unwrap();
        write_rows(&mut tx, SheetName::Batches, &rows).await.unwrap();
        set_format(&mut tx, SheetName::Batches, &format_table(&rows))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let sheet = ctx.store.load(SheetName::Batches).await.unwrap().unwrap();
        assert_eq!(sheet.format.unwrap().frozen_rows, 1);

        let mut tx = ctx.store.begin().await.unwrap();
        clear_sheet(&mut tx, SheetName::Batches).await.unwrap();
        tx.commit().await.unwrap();

        let sheet = ctx.store.load(SheetName::Batches).await.unwrap().unwrap();
        assert!(sheet.rows.is_empty());
        assert!(sheet.format.is_none());
    }

    #[tokio::test]
    async fn test_rolled_back_writes_are_discarded() {
        let ctx = setup_store().await;

        let mut tx = ctx.store.begin().await.unwrap();
        ensure_sheet(&mut tx, SheetName::Courses).await.unwrap();
        tx.rollback().await.unwrap();

        assert!(ctx.store.load(SheetName::Courses).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sheet_names_in_tab_order() {
        let ctx = setup_store().await;
        let mut tx = ctx.store.begin().await.unwrap();
        ensure_sheet(&mut tx, SheetName::Dashboard).await.unwrap();
        ensure_sheet(&mut tx, SheetName::Students).await.unwrap();
        ensure_sheet(&mut tx, SheetName::Students).await.unwrap();
        tx.commit().await.unwrap();

        let names = ctx.store.sheet_names().await.unwrap();
        assert_eq!(names, vec!["Students", "Dashboard"]);
    }
}
