//! Generation API client.
//!
//! Talks to the Gemini `generateContent` endpoint: one POST per analysis,
//! API key passed as a query parameter, no retries. The request timeout is
//! enforced by the HTTP client so a hung upstream cannot stall a handler
//! beyond the configured bound.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Generation client configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` means generation is unconfigured and every call fails
    /// fast with [`GenerationError::MissingCredential`].
    pub api_key: Option<String>,
    /// Full URL of the generateContent endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("api_key_configured", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Gemini generateContent client
pub struct GeminiClient {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish()
    }
}

// generateContent request/response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    // Absent when the candidate was blocked before producing content.
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                GenerationError::Failed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Whether a credential is configured.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Send one prompt and return the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(&self.config.base_url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = %status, "Generation API request failed");
            return Err(GenerationError::Failed(format!(
                "API request failed: {} - {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::Failed(format!(
                "Failed to parse API response: {}",
                e.without_url()
            ))
        })?;

        match first_candidate_text(parsed) {
            Some(text) => {
                tracing::debug!(
                    chars = text.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Generation completed"
                );
                Ok(text)
            }
            None => {
                tracing::warn!("No content returned from generation API");
                Err(GenerationError::EmptyResponse)
            }
        }
    }

    fn classify_send_error(&self, error: reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            GenerationError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            // without_url keeps the key query parameter out of error messages.
            GenerationError::Failed(format!("Request failed: {}", error.without_url()))
        }
    }
}

/// Pull the first candidate's first part, `candidates[0].content.parts[0].text`.
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
}
