//! CSV encoding and decoding
//!
//! The format is close to RFC 4180 with two deliberate limitations on the decode
//! side:
//! - records are split on `\n` unconditionally, so a quoted field cannot span lines
//! - doubled quotes inside a quoted field are not un-escaped; every `"` only
//!   toggles quoting and is dropped from the field

use sheetport_core::{CellValue, Column, ColumnType, Row, Table, generate_row_id};

use crate::coercion::coerce;
use crate::error::{InterchangeError, InterchangeResult};
use crate::inference::infer_column_type;

const FIELD_DELIMITER: char = ',';
const RECORD_DELIMITER: &str = "\n";
const QUALIFIER: char = '"';

/// Encode a table as CSV text.
///
/// The first record holds the column names, then one record per row with the
/// cells in column order. Missing or null cells are empty. Text containing a
/// comma or a double quote is wrapped in quotes with inner quotes doubled.
/// There is no trailing record delimiter.
pub fn encode(table: &Table) -> String {
    let mut records = Vec::with_capacity(table.row_count() + 1);

    records.push(
        table
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in table.rows() {
        let record = table
            .columns()
            .iter()
            .map(|column| encode_field(row.value(&column.id)))
            .collect::<Vec<_>>()
            .join(",");
        records.push(record);
    }

    records.join(RECORD_DELIMITER)
}

fn encode_field(value: Option<CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => String::new(),
        Some(v @ (CellValue::Text(_) | CellValue::Json(_))) => {
            qualify_if_needed(&v.to_display_string())
        }
        Some(v) => v.to_display_string(),
    }
}

fn qualify_if_needed(value: &str) -> String {
    if value.contains(FIELD_DELIMITER) || value.contains(QUALIFIER) {
        let escaped = value.replace(QUALIFIER, "\"\"");
        format!("{}{}{}", QUALIFIER, escaped, QUALIFIER)
    } else {
        value.to_string()
    }
}

/// Decode CSV text into a new table.
///
/// Blank lines are skipped; the first remaining line holds the headers. A header
/// named `Serial No.` or `serialNo` (any case) maps onto the serial number column
/// and its values are discarded. Every other header becomes a fresh editable
/// column whose type is inferred from that column's values, and each value is
/// coerced into that type. Rows get fresh ids and are numbered from 1.
pub fn decode(text: &str) -> InterchangeResult<Table> {
    let lines: Vec<&str> = text
        .split(RECORD_DELIMITER)
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(InterchangeError::EmptyInput);
    };

    let headers = parse_csv_line(header_line);
    let records: Vec<Vec<String>> = data_lines.iter().map(|line| parse_csv_line(line)).collect();

    let mut columns = vec![Column::serial_no()];
    // Position in `headers` -> (column id, column type) for the columns we keep
    let mut targets: Vec<(usize, String, ColumnType)> = Vec::with_capacity(headers.len());

    for (idx, header) in headers.iter().enumerate() {
        if is_serial_header(header) {
            continue;
        }

        let column_type = infer_column_type(
            records
                .iter()
                .filter_map(|record| record.get(idx))
                .map(|field| CellValue::Text(field.clone())),
        );
        let column = Column::new(header.clone(), column_type);
        targets.push((idx, column.id.clone(), column_type));
        columns.push(column);
    }

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let mut row = Row::new(generate_row_id(), position as u64 + 1);
            for (idx, column_id, column_type) in &targets {
                let raw = record
                    .get(*idx)
                    .map(|field| CellValue::Text(field.clone()))
                    .unwrap_or(CellValue::Null);
                row.cells.insert(column_id.clone(), coerce(&raw, *column_type));
            }
            row
        })
        .collect();

    tracing::debug!(
        columns = columns.len(),
        rows = rows.len(),
        "decoded CSV content"
    );

    Ok(Table::from_parts(columns, rows))
}

fn is_serial_header(header: &str) -> bool {
    let lower = header.to_lowercase();
    lower == "serial no." || lower == "serialno"
}

/// Split one CSV line into trimmed fields.
///
/// A `"` toggles quoting and is not kept; a comma separates fields only outside
/// quotes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == QUALIFIER {
            in_quotes = !in_quotes;
        } else if c == FIELD_DELIMITER && !in_quotes {
            result.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    result.push(current.trim().to_string());
    result
}
