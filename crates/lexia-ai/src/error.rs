use lexia_core::AppError;
use thiserror::Error;

/// Generation API errors
///
/// `EmptyResponse` and `Failed` are deliberately distinct: the first means
/// the API answered successfully but produced no usable text, the second
/// that the request itself failed.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation API credential is not configured")]
    MissingCredential,

    #[error("Generation request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Generation API returned no content")]
    EmptyResponse,

    #[error("Generation request failed: {0}")]
    Failed(String),
}

/// Prompt construction errors
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("A question is required for question answering")]
    MissingQuestion,
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MissingCredential => {
                AppError::MissingCredential("GEMINI_API_KEY is not set".to_string())
            }
            GenerationError::Timeout { timeout_secs } => {
                AppError::GenerationTimeout { timeout_secs }
            }
            GenerationError::EmptyResponse => AppError::EmptyGeneration,
            GenerationError::Failed(msg) => AppError::GenerationFailed(msg),
        }
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::MissingQuestion => {
                AppError::MissingParameter("Question is required.".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexia_core::ErrorMetadata;

    #[test]
    fn test_generation_errors_map_to_distinct_app_errors() {
        let empty = AppError::from(GenerationError::EmptyResponse);
        assert_eq!(empty.error_code(), "EMPTY_RESPONSE");
        assert_eq!(empty.http_status_code(), 502);

        let failed = AppError::from(GenerationError::Failed("status 503".to_string()));
        assert_eq!(failed.error_code(), "GENERATION_FAILED");
        assert_eq!(failed.http_status_code(), 502);

        let timeout = AppError::from(GenerationError::Timeout { timeout_secs: 30 });
        assert_eq!(timeout.error_code(), "GENERATION_TIMEOUT");
        assert_eq!(timeout.http_status_code(), 504);

        let missing = AppError::from(GenerationError::MissingCredential);
        assert_eq!(missing.error_code(), "MISSING_CREDENTIAL");
        assert_eq!(missing.http_status_code(), 500);
    }

    #[test]
    fn test_missing_question_maps_to_missing_parameter() {
        let err = AppError::from(PromptError::MissingQuestion);
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "Question is required.");
    }
}
