//! Table document structure
//!
//! A table is an ordered list of typed columns plus an ordered list of rows. The
//! first column is always the read-only serial number column, and every row's
//! `serialNo` equals its 1-based position.
//!
//! `Table` is a value: editing operations take `&self` and return a new table,
//! which the caller then persists as a whole.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::column_type::ColumnType;
use crate::types::CellValue;

/// Id of the mandatory serial number column
pub const SERIAL_NO_COLUMN_ID: &str = "serialNo";

/// Display name of the serial number column
pub const SERIAL_NO_COLUMN_NAME: &str = "Serial No.";

/// Generate a fresh, unique column id.
pub fn generate_column_id() -> String {
    format!("col_{}", Uuid::new_v4().simple())
}

/// Generate a fresh, unique row id.
pub fn generate_row_id() -> String {
    format!("row_{}", Uuid::new_v4().simple())
}

/// Definition of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier, used as the cell key in every row
    pub id: String,
    /// Display name (not guaranteed unique)
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether users may edit cells of this column
    pub editable: bool,
}

impl Column {
    /// Create an editable column with a freshly generated id
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: generate_column_id(),
            name: name.into(),
            column_type,
            editable: true,
        }
    }

    /// The canonical serial number column
    pub fn serial_no() -> Self {
        Self {
            id: SERIAL_NO_COLUMN_ID.to_string(),
            name: SERIAL_NO_COLUMN_NAME.to_string(),
            column_type: ColumnType::Number,
            editable: false,
        }
    }

    pub fn is_serial_no(&self) -> bool {
        self.id == SERIAL_NO_COLUMN_ID
    }
}

/// A row of cell values keyed by column id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Stable identifier, unchanged by edits and renumbering
    pub id: String,
    /// 1-based position of the row in its table
    #[serde(rename = "serialNo")]
    pub serial_no: u64,
    /// Cells, keyed by column id
    #[serde(flatten)]
    pub cells: IndexMap<String, CellValue>,
}

impl Row {
    pub fn new(id: impl Into<String>, serial_no: u64) -> Self {
        Self {
            id: id.into(),
            serial_no,
            cells: IndexMap::new(),
        }
    }

    /// Set a cell, returning the row (builder style)
    pub fn with_value(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }

    /// Value of the cell for `column_id`.
    ///
    /// The serial number column reads from `serial_no` rather than from `cells`.
    pub fn value(&self, column_id: &str) -> Option<CellValue> {
        if column_id == SERIAL_NO_COLUMN_ID {
            return Some(CellValue::Integer(self.serial_no as i64));
        }
        self.cells.get(column_id).cloned()
    }
}

/// Shape accepted when deserializing a stored table; normalized on the way in.
#[derive(Deserialize)]
struct TableDocument {
    #[serde(default)]
    columns: Option<Vec<Column>>,
    #[serde(default)]
    rows: Option<Vec<Row>>,
}

impl From<TableDocument> for Table {
    fn from(doc: TableDocument) -> Self {
        Table::from_parts(
            doc.columns.unwrap_or_default(),
            doc.rows.unwrap_or_default(),
        )
    }
}

/// A dynamic table: ordered columns and ordered rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TableDocument")]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create the default table: the serial number column and no rows
    pub fn new() -> Self {
        Self {
            columns: vec![Column::serial_no()],
            rows: Vec::new(),
        }
    }

    /// Build a table from columns and rows, restoring the serial number invariants.
    ///
    /// - a serial number column is prepended when none is present, or moved to the
    ///   front and reset to its canonical type when it is present elsewhere
    /// - other columns claiming the serial number id are dropped
    /// - every row's `serial_no` is set to its 1-based position
    pub fn from_parts(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let mut serial = None;
        let mut others = Vec::with_capacity(columns.len());
        for column in columns {
            if column.is_serial_no() {
                if serial.is_none() {
                    serial = Some(column);
                }
            } else {
                others.push(column);
            }
        }

        let serial = match serial {
            Some(existing) => Column {
                column_type: ColumnType::Number,
                editable: false,
                ..existing
            },
            None => Column::serial_no(),
        };

        let mut columns = Vec::with_capacity(others.len() + 1);
        columns.push(serial);
        columns.extend(others);

        Self {
            columns,
            rows: renumber(rows),
        }
    }

    /// Consume the table, returning its columns and rows
    pub fn into_parts(self) -> (Vec<Column>, Vec<Row>) {
        (self.columns, self.rows)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find a column by id
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Find a row by id
    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    /// Append a column, giving every existing row the column type's default value.
    ///
    /// A column whose id is already taken is ignored.
    pub fn with_column(&self, column: Column) -> Table {
        if self.column(&column.id).is_some() {
            return self.clone();
        }

        let default = column.column_type.default_value();
        let rows = self
            .rows
            .iter()
            .cloned()
            .map(|mut row| {
                row.cells.insert(column.id.clone(), default.clone());
                row
            })
            .collect();

        let mut columns = self.columns.clone();
        columns.push(column);
        Table { columns, rows }
    }

    /// Remove a column and its cell from every row.
    ///
    /// The serial number column cannot be removed; asking for it returns an
    /// unchanged copy.
    pub fn without_column(&self, column_id: &str) -> Table {
        if column_id == SERIAL_NO_COLUMN_ID {
            return self.clone();
        }

        let columns = self
            .columns
            .iter()
            .filter(|c| c.id != column_id)
            .cloned()
            .collect();
        let rows = self
            .rows
            .iter()
            .cloned()
            .map(|mut row| {
                row.cells.shift_remove(column_id);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Append a row holding each column's default value
    pub fn with_row(&self, row_id: impl Into<String>) -> Table {
        let mut row = Row::new(row_id, self.rows.len() as u64 + 1);
        for column in self.columns.iter().filter(|c| !c.is_serial_no()) {
            row.cells
                .insert(column.id.clone(), column.column_type.default_value());
        }

        let mut rows = self.rows.clone();
        rows.push(row);
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Remove a row and renumber the rest
    pub fn without_row(&self, row_id: &str) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.id != row_id)
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows: renumber(rows),
        }
    }

    /// Replace one cell.
    ///
    /// Writes to the serial number column or to any non-editable column are ignored,
    /// as are unknown row or column ids.
    pub fn with_cell(&self, row_id: &str, column_id: &str, value: CellValue) -> Table {
        let writable = self
            .column(column_id)
            .is_some_and(|c| c.editable && !c.is_serial_no());
        if !writable {
            return self.clone();
        }

        let rows = self
            .rows
            .iter()
            .cloned()
            .map(|mut row| {
                if row.id == row_id {
                    row.cells.insert(column_id.to_string(), value.clone());
                }
                row
            })
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}

fn renumber(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, mut row)| {
            row.serial_no = idx as u64 + 1;
            row
        })
        .collect()
}
