//! Export and import format selection

use std::str::FromStr;

use crate::error::{InterchangeError, InterchangeResult};

/// Default base name for exported files
pub const DEFAULT_FILE_STEM: &str = "table";

/// Format a table can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    /// Upper-case label used in user-facing messages ("CSV exported successfully!")
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    /// File name for an export: `<table name or "table">.<extension>`
    pub fn file_name(&self, table_name: Option<&str>) -> String {
        let stem = table_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_STEM);
        format!("{}.{}", stem, self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = InterchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(InterchangeError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format of a file chosen for import, detected from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    /// Detect the format from the file name's extension, ignoring case.
    ///
    /// Spreadsheet extensions (`xlsx`, `xls`) fail with
    /// [`InterchangeError::ExcelUnsupported`]; any other extension, or none,
    /// fails with [`InterchangeError::UnsupportedFormat`].
    pub fn from_file_name(file_name: &str) -> InterchangeResult<Self> {
        let extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "json" => Ok(ImportFormat::Json),
            "xlsx" | "xls" => Err(InterchangeError::ExcelUnsupported),
            _ => Err(InterchangeError::UnsupportedFormat(extension)),
        }
    }
}
