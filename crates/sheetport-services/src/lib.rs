//! Sheetport Services Layer
//!
//! Orchestrates the data model, the interchange codecs and the collaborators
//! (`TableStore`, `FileDownload`, `ImportSource`) behind a small async API.
//!
//! # Architecture
//!
//! ```text
//! CLI (sheetport-cli)
//!     ↓
//! Service Layer (sheetport-services) ← This crate
//!     ↓
//! Interchange (sheetport-interchange)    Storage (sheetport-storage)
//!     ↓                                      ↓
//! Core (sheetport-core: Table, TableStore, FileDownload, ImportSource)
//! ```
//!
//! # Services
//!
//! - [`ImportExportService`] - CSV/JSON export to a download sink, import that replaces a table
//! - [`TableService`] - Column, row and cell edits with full-document writes

mod error;
mod import_export_service;
mod table_service;
mod view_models;

pub use error::{ServiceError, ServiceResult};
pub use import_export_service::ImportExportService;
pub use table_service::TableService;
pub use view_models::ExportedFile;

pub use sheetport_interchange::ImportResult;
