use thiserror::Error;

pub type InterchangeResult<T> = Result<T, InterchangeError>;

/// Errors raised while choosing a format or decoding/encoding file content
#[derive(Debug, Error)]
pub enum InterchangeError {
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
}
