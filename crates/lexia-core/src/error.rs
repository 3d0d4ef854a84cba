//! Error types module
//!
//! This module provides the core error types used throughout the Lexia
//! application. All errors are unified under the `AppError` enum which can
//! represent database, storage, validation, generation-service, and other
//! domain-specific errors.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature. With `default-features = false`, build without the `sqlx` feature;
//! then `AppError` has no typed database variant.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like empty generation results
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "TEXT_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Document text not available: {0}")]
    TextUnavailable(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Generation service timed out after {timeout_secs}s")]
    GenerationTimeout { timeout_secs: u64 },

    #[error("Generation service returned no candidates")]
    EmptyGeneration,

    #[error("Generation request failed: {0}")]
    GenerationFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations following Rust best practices
#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the document ID exists and belongs to you"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size below the configured limit"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMediaType(_) => (
            415,
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            Some("Upload a PDF, DOCX, or plain-text file"),
            false,
            LogLevel::Debug,
        ),
        AppError::TextUnavailable(_) => (
            400,
            "TEXT_UNAVAILABLE",
            false,
            Some("Re-upload the document or check its processing status"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingParameter(_) => (
            400,
            "MISSING_PARAMETER",
            false,
            Some("Provide the missing request parameter"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingCredential(_) => (
            500,
            "MISSING_CREDENTIAL",
            false,
            Some("Contact the operator to configure the generation service"),
            true,
            LogLevel::Error,
        ),
        AppError::GenerationTimeout { .. } => (
            504,
            "GENERATION_TIMEOUT",
            true,
            Some("Retry the operation"),
            false,
            LogLevel::Warn,
        ),
        AppError::EmptyGeneration => (
            502,
            "EMPTY_RESPONSE",
            true,
            Some("Retry the operation"),
            false,
            LogLevel::Warn,
        ),
        AppError::GenerationFailed(_) => (
            502,
            "GENERATION_FAILED",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Check API key or authentication token"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::TextUnavailable(_) => "TextUnavailable",
            AppError::MissingParameter(_) => "MissingParameter",
            AppError::MissingCredential(_) => "MissingCredential",
            AppError::GenerationTimeout { .. } => "GenerationTimeout",
            AppError::EmptyGeneration => "EmptyGeneration",
            AppError::GenerationFailed(_) => "GenerationFailed",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        // Add source error chain
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::UnsupportedMediaType(_) => {
                "Only PDF, DOCX, and TXT files are supported.".to_string()
            }
            AppError::TextUnavailable(_) => {
                "Document text not available. Processing may have failed.".to_string()
            }
            AppError::MissingParameter(ref msg) => msg.clone(),
            AppError::MissingCredential(_) => {
                "Generation service is not configured.".to_string()
            }
            AppError::GenerationTimeout { .. } => {
                "Generation service timed out. Please try again later.".to_string()
            }
            AppError::EmptyGeneration => {
                "Generation service returned no content.".to_string()
            }
            AppError::GenerationFailed(_) => {
                "Failed to generate analysis. Please try again later.".to_string()
            }
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Document not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Document not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_text_unavailable() {
        let err = AppError::TextUnavailable("extraction failed".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "TEXT_UNAVAILABLE");
        assert_eq!(
            err.client_message(),
            "Document text not available. Processing may have failed."
        );
        assert!(!err.is_sensitive());
    }

    #[test]
    fn test_error_metadata_generation_errors_are_distinct() {
        let timeout = AppError::GenerationTimeout { timeout_secs: 30 };
        assert_eq!(timeout.http_status_code(), 504);
        assert_eq!(timeout.error_code(), "GENERATION_TIMEOUT");
        assert!(timeout.is_recoverable());

        let empty = AppError::EmptyGeneration;
        assert_eq!(empty.http_status_code(), 502);
        assert_eq!(empty.error_code(), "EMPTY_RESPONSE");

        let failed = AppError::GenerationFailed("status 503".to_string());
        assert_eq!(failed.http_status_code(), 502);
        assert_eq!(failed.error_code(), "GENERATION_FAILED");
        assert_ne!(empty.error_code(), failed.error_code());
    }

    #[test]
    fn test_error_metadata_missing_credential_is_sensitive() {
        let err = AppError::MissingCredential("GEMINI_API_KEY".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "MISSING_CREDENTIAL");
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Generation service is not configured.");
    }

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge("File size cannot exceed 10MB.".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err1 = AppError::UnsupportedMediaType("application/zip".to_string());
        assert_eq!(
            err1.suggested_action(),
            Some("Upload a PDF, DOCX, or plain-text file")
        );

        let err2 = AppError::NotFound("test".to_string());
        assert_eq!(
            err2.suggested_action(),
            Some("Verify the document ID exists and belongs to you")
        );

        let err3 = AppError::MissingParameter("Question is required.".to_string());
        assert_eq!(
            err3.suggested_action(),
            Some("Provide the missing request parameter")
        );
    }

    #[test]
    fn test_detailed_message_walks_source_chain() {
        let source = anyhow::anyhow!("connection refused").context("request dispatch failed");
        let err = AppError::InternalWithSource {
            message: "generation call failed".to_string(),
            source,
        };
        let details = err.detailed_message();
        assert!(details.contains("Caused by"));
        assert!(details.contains("connection refused"));
    }
}
