use serde::Serialize;
use sheetport_core::{Column, Row, Table};

/// Outcome of decoding an import file: the new columns and rows, and how many
/// rows were imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub imported: usize,
}

impl ImportResult {
    pub fn from_table(table: Table) -> Self {
        let (columns, rows) = table.into_parts();
        Self {
            imported: rows.len(),
            columns,
            rows,
        }
    }

    /// The table this result describes
    pub fn to_table(&self) -> Table {
        Table::from_parts(self.columns.clone(), self.rows.clone())
    }
}
