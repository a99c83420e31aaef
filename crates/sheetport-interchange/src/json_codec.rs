//! JSON encoding and decoding
//!
//! Export writes a self-describing document with a timestamp and counts. Import
//! accepts any object with `columns` and `rows` arrays, normalizes the serial
//! number column and row numbering, and keeps cell values exactly as written.

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetport_core::{
    CellValue, Column, ColumnType, Row, Table, generate_column_id, generate_row_id,
};

use crate::error::{InterchangeError, InterchangeResult};

/// Document produced by JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// RFC 3339 UTC timestamp taken at encode time
    pub export_date: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub metadata: ExportMetadata,
}

/// Counts recorded alongside an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_rows: usize,
    pub total_columns: usize,
}

/// Build the export document for `table`.
///
/// Columns and rows are echoed as they are; no coercion happens on export.
pub fn encode(table: &Table, table_name: Option<&str>) -> ExportDocument {
    ExportDocument {
        table_name: table_name.map(str::to_string),
        export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        columns: table.columns().to_vec(),
        rows: table.rows().to_vec(),
        metadata: ExportMetadata {
            total_rows: table.row_count(),
            total_columns: table.column_count(),
        },
    }
}

/// Encode `table` as pretty-printed JSON text.
pub fn encode_to_string(table: &Table, table_name: Option<&str>) -> InterchangeResult<String> {
    let document = encode(table, table_name);
    serde_json::to_string_pretty(&document).map_err(|e| InterchangeError::Encode(e.to_string()))
}

#[derive(Deserialize)]
struct ImportDocument {
    #[serde(default)]
    columns: Option<Vec<ImportedColumn>>,
    #[serde(default)]
    rows: Option<Vec<ImportedRow>>,
}

#[derive(Deserialize)]
struct ImportedColumn {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    column_type: Option<String>,
    #[serde(default)]
    editable: Option<bool>,
}

#[derive(Deserialize)]
struct ImportedRow {
    #[serde(default)]
    id: Option<Value>,
    // Read so it never lands among the cells; the position wins.
    #[serde(default, rename = "serialNo")]
    _serial_no: Option<Value>,
    #[serde(flatten)]
    cells: IndexMap<String, CellValue>,
}

/// Decode JSON text into a new table.
///
/// Fails with [`InterchangeError::InvalidFormat`] when the text is not JSON, when
/// `columns` or `rows` is missing, or when a column declares an unknown type.
/// The serial number column is added when absent, every row is renumbered by
/// position, and row ids are kept when present.
pub fn decode(text: &str) -> InterchangeResult<Table> {
    let document: ImportDocument =
        serde_json::from_str(text).map_err(|e| InterchangeError::InvalidFormat(e.to_string()))?;

    let (Some(columns), Some(rows)) = (document.columns, document.rows) else {
        return Err(InterchangeError::InvalidFormat(
            "Expected columns and rows properties.".to_string(),
        ));
    };

    let columns = columns
        .into_iter()
        .map(into_column)
        .collect::<InterchangeResult<Vec<_>>>()?;

    let rows: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(position, imported)| Row {
            id: row_id(imported.id),
            serial_no: position as u64 + 1,
            cells: imported.cells,
        })
        .collect();

    tracing::debug!(
        columns = columns.len(),
        rows = rows.len(),
        "decoded JSON content"
    );

    Ok(Table::from_parts(columns, rows))
}

fn into_column(imported: ImportedColumn) -> InterchangeResult<Column> {
    let column_type = match imported.column_type.as_deref() {
        None => ColumnType::Text,
        Some(raw) => raw
            .parse::<ColumnType>()
            .map_err(|e| InterchangeError::InvalidFormat(e.to_string()))?,
    };
    let id = imported
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_column_id);
    let name = imported.name.unwrap_or_else(|| id.clone());

    Ok(Column {
        id,
        name,
        column_type,
        editable: imported.editable.unwrap_or(true),
    })
}

fn row_id(raw: Option<Value>) -> String {
    match raw {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => generate_row_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sheetport_core::SERIAL_NO_COLUMN_ID;

    fn sample() -> Table {
        let name = Column {
            id: "col_name".into(),
            name: "Name".into(),
            column_type: ColumnType::Text,
            editable: true,
        };
        let tags = Column {
            id: "col_tags".into(),
            name: "Tags".into(),
            column_type: ColumnType::Text,
            editable: false,
        };
        Table::from_parts(
            vec![Column::serial_no(), name, tags],
            vec![
                Row::new("r1", 1)
                    .with_value("col_name", "Alice")
                    .with_value("col_tags", CellValue::Json(json!(["a", "b"]))),
                Row::new("r2", 2).with_value("col_name", 2.5),
            ],
        )
    }

    #[test]
    fn encode_echoes_table_with_metadata() {
        let document = encode(&sample(), Some("people"));
        assert_eq!(document.table_name.as_deref(), Some("people"));
        assert_eq!(document.columns, sample().columns().to_vec());
        assert_eq!(document.rows, sample().rows().to_vec());
        assert_eq!(
            document.metadata,
            ExportMetadata {
                total_rows: 2,
                total_columns: 3
            }
        );
        assert!(document.export_date.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&document.export_date).is_ok());
    }

    #[test]
    fn encoded_json_uses_wire_names() {
        let text = encode_to_string(&sample(), Some("people")).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tableName"], json!("people"));
        assert_eq!(value["metadata"]["totalRows"], json!(2));
        assert_eq!(value["metadata"]["totalColumns"], json!(3));
        assert_eq!(value["columns"][0]["id"], json!("serialNo"));
        assert_eq!(value["columns"][0]["type"], json!("number"));
        assert_eq!(value["rows"][0]["serialNo"], json!(1));
        assert_eq!(value["rows"][0]["col_tags"], json!(["a", "b"]));
        assert!(text.contains("\n  \"columns\""));
    }

    #[test]
    fn encode_without_name_omits_it() {
        let text = encode_to_string(&Table::new(), None).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("tableName").is_none());
    }

    #[test]
    fn round_trip_is_structurally_equal() {
        let table = sample();
        let text = encode_to_string(&table, Some("people")).unwrap();
        assert_eq!(decode(&text).unwrap(), table);
    }

    #[test]
    fn decode_requires_columns_and_rows() {
        for input in [r#"{"rows": []}"#, r#"{"columns": []}"#, "{}"] {
            assert!(matches!(
                decode(input),
                Err(InterchangeError::InvalidFormat(_))
            ));
        }
        assert!(matches!(
            decode("not json"),
            Err(InterchangeError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode("[1, 2]"),
            Err(InterchangeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn decode_prepends_serial_column_and_renumbers() {
        let input = json!({
            "columns": [{"id": "c1", "name": "City", "type": "text", "editable": true}],
            "rows": [
                {"id": "a", "serialNo": 9, "c1": "Oslo"},
                {"serialNo": "x", "c1": "Lima"},
                {"id": 42, "c1": null}
            ]
        });
        let table = decode(&input.to_string()).unwrap();

        assert_eq!(table.columns()[0], Column::serial_no());
        assert_eq!(table.columns()[1].id, "c1");

        let rows = table.rows();
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[0].serial_no, 1);
        assert_eq!(rows[1].serial_no, 2);
        assert!(rows[1].id.starts_with("row_"));
        assert_eq!(rows[2].id, "42");
        assert_eq!(rows[2].serial_no, 3);
        assert_eq!(rows[2].value("c1"), Some(CellValue::Null));
        assert!(!rows[0].cells.contains_key(SERIAL_NO_COLUMN_ID));
    }

    #[test]
    fn decode_keeps_values_without_coercion() {
        let input = json!({
            "columns": [{"id": "n", "name": "N", "type": "number"}],
            "rows": [{"id": "r", "n": "not a number"}]
        });
        let table = decode(&input.to_string()).unwrap();
        assert_eq!(table.rows()[0].value("n"), Some("not a number".into()));
        assert!(table.columns()[1].editable);
    }

    #[test]
    fn decode_moves_serial_column_first() {
        let input = json!({
            "columns": [
                {"id": "c1", "name": "City", "type": "text", "editable": true},
                {"id": "serialNo", "name": "#", "type": "text", "editable": true}
            ],
            "rows": []
        });
        let table = decode(&input.to_string()).unwrap();
        let serial = &table.columns()[0];
        assert_eq!(serial.id, SERIAL_NO_COLUMN_ID);
        assert_eq!(serial.name, "#");
        assert_eq!(serial.column_type, ColumnType::Number);
        assert!(!serial.editable);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn decode_rejects_unknown_column_type() {
        let input = json!({
            "columns": [{"id": "c1", "name": "C", "type": "currency"}],
            "rows": []
        });
        assert!(matches!(
            decode(&input.to_string()),
            Err(InterchangeError::InvalidFormat(msg)) if msg.contains("currency")
        ));
    }

    #[test]
    fn decode_fills_missing_column_fields() {
        let input = json!({"columns": [{"id": "c1"}, {"name": "Anon", "type": "email"}], "rows": []});
        let table = decode(&input.to_string()).unwrap();
        let columns = table.columns();
        assert_eq!(columns[1].name, "c1");
        assert_eq!(columns[1].column_type, ColumnType::Text);
        assert!(columns[2].id.starts_with("col_"));
        assert_eq!(columns[2].column_type, ColumnType::Email);
    }
}
