//! Table import and export
//!
//! Export encodes the stored table and hands the content to a `FileDownload`.
//! Import decodes a file into a brand-new table and overwrites the stored
//! document with it.

use std::sync::Arc;

use sheetport_core::{FileDownload, ImportSource, TableStore};
use sheetport_interchange::{ExportFormat, ImportFormat, ImportResult};

use crate::error::{ServiceError, ServiceResult};
use crate::view_models::ExportedFile;

const UTF8_BOM: &str = "\u{feff}";

/// Service for moving tables in and out of CSV and JSON files
pub struct ImportExportService {
    store: Arc<dyn TableStore>,
    download: Arc<dyn FileDownload>,
}

impl ImportExportService {
    pub fn new(store: Arc<dyn TableStore>, download: Arc<dyn FileDownload>) -> Self {
        Self { store, download }
    }

    /// Export a stored table and deliver it as a file.
    ///
    /// # Arguments
    ///
    /// * `table_id` - Document to export
    /// * `format` - `csv` or `json`, any case
    /// * `table_name` - Base name of the delivered file; `table` when absent
    ///
    /// Fails with `UnsupportedFormat` before touching the store when the format
    /// is unknown, and with `NotFound` when the table has no document.
    #[tracing::instrument(skip(self))]
    pub async fn export(
        &self,
        table_id: &str,
        format: &str,
        table_name: Option<&str>,
    ) -> ServiceResult<ExportedFile> {
        let format: ExportFormat = format.parse()?;

        let table = self
            .store
            .load(table_id)
            .await
            .map_err(|e| ServiceError::store(format!("Failed to load table '{}'", table_id), e))?
            .ok_or_else(|| ServiceError::NotFound(table_id.to_string()))?;

        let content = sheetport_interchange::encode(format, &table, table_name)?;
        let filename = format.file_name(table_name);

        self.download
            .deliver(&content, &filename, format.mime_type());

        tracing::info!(
            table_id,
            %format,
            filename = %filename,
            rows = table.row_count(),
            "exported table"
        );

        Ok(ExportedFile {
            filename,
            mime_type: format.mime_type().to_string(),
            size: content.len(),
            format,
        })
    }

    /// Import a file, replacing the stored table with its content.
    ///
    /// The format comes from the file name's extension and is checked before
    /// the file is read. The previous document is overwritten in one write;
    /// when that write fails the error is returned and nothing else changes.
    #[tracing::instrument(skip(self, source), fields(file = source.file_name()))]
    pub async fn import(
        &self,
        source: &dyn ImportSource,
        table_id: &str,
    ) -> ServiceResult<ImportResult> {
        let format = ImportFormat::from_file_name(source.file_name())?;
        let text = read_text(source).await?;

        let result = sheetport_interchange::decode(format, &text)?;

        self.store
            .save(table_id, &result.to_table())
            .await
            .map_err(|e| ServiceError::store(format!("Failed to save table '{}'", table_id), e))?;

        tracing::info!(
            table_id,
            imported = result.imported,
            columns = result.columns.len(),
            "imported table"
        );

        Ok(result)
    }
}

async fn read_text(source: &dyn ImportSource) -> ServiceResult<String> {
    let file_read = |source_err| ServiceError::FileRead {
        file_name: source.file_name().to_string(),
        source: source_err,
    };

    let bytes = source.read_all().await.map_err(file_read)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| file_read(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
