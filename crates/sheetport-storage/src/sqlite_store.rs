//! SQLite-backed table store
//!
//! One row per table id holds the whole document as JSON text. A save is a
//! single `INSERT OR REPLACE`, so readers see either the old or the new
//! document and never a mix.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use sheetport_core::{StoreError, StoreResult, Table, TableStore};
use std::path::Path;
use std::sync::Arc;

/// `TableStore` over a local SQLite database
#[derive(Clone)]
pub struct SqliteTableStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTableStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "opening table database");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| {
            StoreError::Backend(format!(
                "Failed to open table database at '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Backend(format!("Failed to open in-memory database: {}", e))
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> StoreResult<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS table_data (
                id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(backend)?;
        Ok(())
    }

    /// Ids of every stored table, sorted
    pub fn table_ids(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id FROM table_data ORDER BY id")
            .map_err(backend)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(backend)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(backend)?;
        Ok(ids)
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl TableStore for SqliteTableStore {
    async fn load(&self, table_id: &str) -> StoreResult<Option<Table>> {
        let document: Option<String> = {
            let conn = self.conn.lock();
            conn.query_row(
                "SELECT document FROM table_data WHERE id = ?1",
                params![table_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)?
        };

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, table_id: &str, table: &Table) -> StoreResult<()> {
        let document = serde_json::to_string(table)?;
        let now = Utc::now().to_rfc3339();

        self.conn
            .lock()
            .execute(
                "INSERT OR REPLACE INTO table_data (id, document, updated_at)
                 VALUES (?1, ?2, ?3)",
                params![table_id, document, now],
            )
            .map_err(backend)?;

        tracing::debug!(table_id, rows = table.row_count(), "saved table document");
        Ok(())
    }

    async fn delete(&self, table_id: &str) -> StoreResult<bool> {
        let removed = self
            .conn
            .lock()
            .execute("DELETE FROM table_data WHERE id = ?1", params![table_id])
            .map_err(backend)?;
        Ok(removed > 0)
    }
}
