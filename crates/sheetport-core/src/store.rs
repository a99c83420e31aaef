//! Table persistence contract

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::StoreResult;
use crate::table::Table;

/// Persists whole table documents by id.
///
/// Every write replaces the full document (last writer wins). Implementations
/// should make `save` a single atomic replace so that a failed write never
/// leaves a half-written document behind.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Load a table, returning `None` when no document exists for the id
    async fn load(&self, table_id: &str) -> StoreResult<Option<Table>>;

    /// Replace the document for the id
    async fn save(&self, table_id: &str, table: &Table) -> StoreResult<()>;

    /// Remove the document, returning whether one existed
    async fn delete(&self, table_id: &str) -> StoreResult<bool>;

    /// Persist and return the default table for an id that has no document yet
    async fn create_default(&self, table_id: &str) -> StoreResult<Table> {
        let table = Table::new();
        self.save(table_id, &table).await?;
        tracing::debug!(table_id, "created default table document");
        Ok(table)
    }
}

/// In-process `TableStore` backed by a map
#[derive(Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one document
    pub fn with_table(self, table_id: impl Into<String>, table: Table) -> Self {
        self.tables.write().insert(table_id.into(), table);
        self
    }

    /// Synchronous snapshot of a stored document
    pub fn get(&self, table_id: &str) -> Option<Table> {
        self.tables.read().get(table_id).cloned()
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn load(&self, table_id: &str) -> StoreResult<Option<Table>> {
        Ok(self.get(table_id))
    }

    async fn save(&self, table_id: &str, table: &Table) -> StoreResult<()> {
        self.tables
            .write()
            .insert(table_id.to_string(), table.clone());
        Ok(())
    }

    async fn delete(&self, table_id: &str) -> StoreResult<bool> {
        Ok(self.tables.write().remove(table_id).is_some())
    }
}
