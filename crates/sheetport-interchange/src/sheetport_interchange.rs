//! Sheetport data interchange
//!
//! Converts tables to and from CSV and JSON files. Exports are a structural echo
//! of the table; imports build a brand-new table that replaces the old one.
//!
//! # Architecture
//!
//! ```text
//! CSV text  → csv_codec::decode → inference + coercion ─┐
//!                                                       ├→ Table → ImportResult
//! JSON text → json_codec::decode (values kept as-is) ───┘
//!
//! Table → csv_codec::encode / json_codec::encode_to_string → file content
//! ```
//!
//! CSV has no type information, so each column's type is guessed from a sample
//! of its values and every value is coerced into that type. JSON carries its own
//! column definitions and its cell values are trusted.
//!
//! # Example
//!
//! ```rust,ignore
//! let format = ImportFormat::from_file_name("people.csv")?;
//! let result = decode(format, "Name,Age\nAlice,30")?;
//! assert_eq!(result.imported, 1);
//! ```

mod coercion;
pub mod csv_codec;
mod error;
mod format;
mod import_result;
mod inference;
pub mod json_codec;

pub use coercion::{coerce, parse_date, parse_number};
pub use error::{InterchangeError, InterchangeResult};
pub use format::{DEFAULT_FILE_STEM, ExportFormat, ImportFormat};
pub use import_result::ImportResult;
pub use inference::{SAMPLE_SIZE, infer_column_type};
pub use json_codec::{ExportDocument, ExportMetadata};

use sheetport_core::Table;

/// Encode `table` in `format`, returning the file content.
pub fn encode(
    format: ExportFormat,
    table: &Table,
    table_name: Option<&str>,
) -> InterchangeResult<String> {
    match format {
        ExportFormat::Csv => Ok(csv_codec::encode(table)),
        ExportFormat::Json => json_codec::encode_to_string(table, table_name),
    }
}

/// Decode file content in `format` into an import result.
pub fn decode(format: ImportFormat, text: &str) -> InterchangeResult<ImportResult> {
    let table = match format {
        ImportFormat::Csv => csv_codec::decode(text)?,
        ImportFormat::Json => json_codec::decode(text)?,
    };
    Ok(ImportResult::from_table(table))
}
