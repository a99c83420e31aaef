//! View models returned by services

use serde::Serialize;
use sheetport_interchange::ExportFormat;

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub filename: String,
    pub mime_type: String,
    /// Size of the delivered content in bytes
    pub size: usize,
    #[serde(skip)]
    pub format: ExportFormat,
}

impl ExportedFile {
    /// Message shown to the user after a successful export
    pub fn success_message(&self) -> String {
        format!("{} exported successfully!", self.format.label())
    }
}
