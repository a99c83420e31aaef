//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use sheetport_core::{
    Column, ColumnType, ImportSource, MemoryDownload, MemoryTableStore, Row, StoreError,
    StoreResult, Table, TableStore,
};
use sheetport_services::{ImportExportService, TableService};

/// Store that delegates to memory but can be told to fail loads or saves.
///
/// Counts `save` calls so tests can assert that nothing was written.
pub struct FlakyStore {
    pub inner: MemoryTableStore,
    pub fail_loads: bool,
    pub fail_saves: bool,
    pub save_count: Arc<parking_lot::Mutex<usize>>,
}

impl FlakyStore {
    pub fn new(inner: MemoryTableStore) -> Self {
        Self {
            inner,
            fail_loads: false,
            fail_saves: false,
            save_count: Arc::new(parking_lot::Mutex::new(0)),
        }
    }

    pub fn failing_loads(mut self) -> Self {
        self.fail_loads = true;
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.lock()
    }
}

#[async_trait]
impl TableStore for FlakyStore {
    async fn load(&self, table_id: &str) -> StoreResult<Option<Table>> {
        if self.fail_loads {
            return Err(StoreError::Backend("connection reset".into()));
        }
        self.inner.load(table_id).await
    }

    async fn save(&self, table_id: &str, table: &Table) -> StoreResult<()> {
        *self.save_count.lock() += 1;
        if self.fail_saves {
            return Err(StoreError::Backend("write rejected".into()));
        }
        self.inner.save(table_id, table).await
    }

    async fn delete(&self, table_id: &str) -> StoreResult<bool> {
        self.inner.delete(table_id).await
    }
}

/// Import source whose read always fails
pub struct UnreadableSource {
    pub name: String,
}

#[async_trait]
impl ImportSource for UnreadableSource {
    fn file_name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }
}

/// Three-column table: serial number, Name (text), Age (number)
pub fn people_table() -> Table {
    let name = Column {
        id: "col_name".into(),
        name: "Name".into(),
        column_type: ColumnType::Text,
        editable: true,
    };
    let age = Column {
        id: "col_age".into(),
        name: "Age".into(),
        column_type: ColumnType::Number,
        editable: true,
    };
    Table::from_parts(
        vec![Column::serial_no(), name, age],
        vec![
            Row::new("r1", 1)
                .with_value("col_name", "Alice")
                .with_value("col_age", 30),
            Row::new("r2", 2)
                .with_value("col_name", "Bob")
                .with_value("col_age", 25),
            Row::new("r3", 3)
                .with_value("col_name", "Carol")
                .with_value("col_age", 41),
        ],
    )
}

pub fn import_export_service(
    store: Arc<dyn TableStore>,
) -> (ImportExportService, Arc<MemoryDownload>) {
    let download = Arc::new(MemoryDownload::new());
    let service = ImportExportService::new(store, download.clone());
    (service, download)
}

pub fn table_service(store: Arc<dyn TableStore>) -> TableService {
    TableService::new(store)
}
