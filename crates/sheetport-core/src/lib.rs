//! Sheetport Core - data model and collaborator traits
//!
//! This crate provides the types every other sheetport crate builds on:
//!
//! - `CellValue` - a raw or canonical scalar stored in a table cell
//! - `ColumnType` - the catalog of supported column types and their defaults
//! - `Column`, `Row`, `Table` - the dynamic table document
//! - `TableStore` - persistence of table documents by id
//! - `FileDownload` - delivery of generated text content as a named file
//! - `ImportSource` - whole-buffer access to a file chosen for import

mod column_type;
mod download;
mod error;
mod source;
mod store;
mod table;
mod types;

pub use column_type::{ColumnType, UnknownColumnType, today_iso_date};
pub use download::{Delivery, FileDownload, MemoryDownload};
pub use error::{StoreError, StoreResult};
pub use source::{ImportSource, InMemorySource};
pub use store::{MemoryTableStore, TableStore};
pub use table::{
    Column, Row, SERIAL_NO_COLUMN_ID, SERIAL_NO_COLUMN_NAME, Table, generate_column_id,
    generate_row_id,
};
pub use types::CellValue;
