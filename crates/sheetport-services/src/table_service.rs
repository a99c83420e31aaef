//! Table editing service
//!
//! Loads a table document, applies one edit and writes the whole document back.
//! Tables that do not exist yet are created with the default layout on first use.

use std::sync::Arc;

use sheetport_core::{
    CellValue, Column, ColumnType, Row, SERIAL_NO_COLUMN_ID, Table, TableStore, generate_row_id,
};
use sheetport_interchange::coerce;

use crate::error::{ServiceError, ServiceResult};

/// Service for structural and cell edits on a stored table
pub struct TableService {
    store: Arc<dyn TableStore>,
}

impl TableService {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Load a table, creating and persisting the default one when missing
    #[tracing::instrument(skip(self))]
    pub async fn load_or_create(&self, table_id: &str) -> ServiceResult<Table> {
        let existing = self
            .store
            .load(table_id)
            .await
            .map_err(|e| ServiceError::store(format!("Failed to load table '{}'", table_id), e))?;

        match existing {
            Some(table) => Ok(table),
            None => self.store.create_default(table_id).await.map_err(|e| {
                ServiceError::store(format!("Failed to create table '{}'", table_id), e)
            }),
        }
    }

    /// Append a column and fill it with the type's default value in every row
    #[tracing::instrument(skip(self))]
    pub async fn add_column(
        &self,
        table_id: &str,
        name: &str,
        column_type: ColumnType,
    ) -> ServiceResult<Column> {
        let table = self.load_or_create(table_id).await?;
        let column = Column::new(name, column_type);
        self.persist(table_id, &table.with_column(column.clone()))
            .await?;
        tracing::debug!(column_id = %column.id, "added column");
        Ok(column)
    }

    /// Remove a column. Removing the serial number column leaves the table as is.
    #[tracing::instrument(skip(self))]
    pub async fn delete_column(&self, table_id: &str, column_id: &str) -> ServiceResult<Table> {
        let table = self.load_or_create(table_id).await?;
        if column_id == SERIAL_NO_COLUMN_ID {
            return Ok(table);
        }
        if table.column(column_id).is_none() {
            return Err(ServiceError::ColumnNotFound(column_id.to_string()));
        }

        let updated = table.without_column(column_id);
        self.persist(table_id, &updated).await?;
        Ok(updated)
    }

    /// Append a row of default values
    #[tracing::instrument(skip(self))]
    pub async fn add_row(&self, table_id: &str) -> ServiceResult<Row> {
        let table = self.load_or_create(table_id).await?;
        let row_id = generate_row_id();
        let updated = table.with_row(row_id.clone());
        self.persist(table_id, &updated).await?;

        updated
            .row(&row_id)
            .cloned()
            .ok_or(ServiceError::RowNotFound(row_id))
    }

    /// Remove a row and renumber the remaining ones
    #[tracing::instrument(skip(self))]
    pub async fn delete_row(&self, table_id: &str, row_id: &str) -> ServiceResult<Table> {
        let table = self.load_or_create(table_id).await?;
        if table.row(row_id).is_none() {
            return Err(ServiceError::RowNotFound(row_id.to_string()));
        }

        let updated = table.without_row(row_id);
        self.persist(table_id, &updated).await?;
        Ok(updated)
    }

    /// Write one cell, coercing `value` to the column's type first.
    ///
    /// The serial number column and non-editable columns are read-only; writes to
    /// them return the table unchanged without saving.
    #[tracing::instrument(skip(self))]
    pub async fn update_cell(
        &self,
        table_id: &str,
        row_id: &str,
        column_id: &str,
        value: CellValue,
    ) -> ServiceResult<Table> {
        let table = self.load_or_create(table_id).await?;
        let column = table
            .column(column_id)
            .ok_or_else(|| ServiceError::ColumnNotFound(column_id.to_string()))?;
        if table.row(row_id).is_none() {
            return Err(ServiceError::RowNotFound(row_id.to_string()));
        }
        if column.is_serial_no() || !column.editable {
            tracing::debug!(column_id, "ignoring write to read-only column");
            return Ok(table);
        }

        let value = coerce(&value, column.column_type);
        let updated = table.with_cell(row_id, column_id, value);
        self.persist(table_id, &updated).await?;
        Ok(updated)
    }

    /// Delete the stored document, returning whether one existed
    #[tracing::instrument(skip(self))]
    pub async fn delete_table(&self, table_id: &str) -> ServiceResult<bool> {
        self.store
            .delete(table_id)
            .await
            .map_err(|e| ServiceError::store(format!("Failed to delete table '{}'", table_id), e))
    }

    async fn persist(&self, table_id: &str, table: &Table) -> ServiceResult<()> {
        self.store
            .save(table_id, table)
            .await
            .map_err(|e| ServiceError::store(format!("Failed to save table '{}'", table_id), e))
    }
}
