use sheetport_core::StoreError;
use sheetport_interchange::InterchangeError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Table not found: {0}")]
    NotFound(String),

    #[error("CSV file is empty")]
    EmptyInput,

    #[error("Invalid JSON format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported format: '{0}'. Please use CSV or JSON.")]
    UnsupportedFormat(String),

    #[error("Excel import is not available. Please use CSV or JSON import instead.")]
    ExcelUnsupported,

    #[error("Failed to encode table: {0}")]
    Encode(String),

    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to read '{file_name}': {source}")]
    FileRead {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

impl ServiceError {
    pub(crate) fn store(context: impl Into<String>, source: StoreError) -> Self {
        ServiceError::Store {
            context: context.into(),
            source,
        }
    }
}

impl From<InterchangeError> for ServiceError {
    fn from(err: InterchangeError) -> Self {
        match err {
            InterchangeError::EmptyInput => ServiceError::EmptyInput,
            InterchangeError::InvalidFormat(msg) => ServiceError::InvalidFormat(msg),
            InterchangeError::UnsupportedFormat(format) => ServiceError::UnsupportedFormat(format),
            InterchangeError::ExcelUnsupported => ServiceError::ExcelUnsupported,
            InterchangeError::Encode(msg) => ServiceError::Encode(msg),
        }
    }
}
