use thiserror::Error;

/// Text extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("{0} extraction is not available in this build")]
    CapabilityUnavailable(&'static str),
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;
