//! Configuration module
//!
//! This module provides configuration structures for the API and services,
//! including database, storage, authentication, and generation-service
//! settings. Everything is sourced from the environment (a `.env` file is
//! loaded first when present).

use std::env;

use crate::constants::{DEFAULT_MAX_DOCUMENT_SIZE_BYTES, MASTER_API_KEY_MIN_LEN};
use crate::models::DocumentKind;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const GEMINI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GEMINI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Base configuration shared by every service surface
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Document service configuration
#[derive(Clone, Debug)]
pub struct DocumentServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub master_api_key: String,
    // Storage configuration
    pub storage_backend: String,
    pub local_storage_path: String,
    // Document upload constraints
    pub max_document_size_bytes: usize,
    pub document_allowed_content_types: Vec<String>,
    // Generation service (Gemini). The credential is optional: its absence is
    // reported per-operation as MISSING_CREDENTIAL, not at startup.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<DocumentServiceConfig>);

impl Config {
    fn inner(&self) -> &DocumentServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = DocumentServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn host(&self) -> &str {
        &self.inner().base.host
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn master_api_key(&self) -> &str {
        &self.inner().master_api_key
    }

    pub fn storage_backend(&self) -> &str {
        &self.inner().storage_backend
    }

    pub fn local_storage_path(&self) -> &str {
        &self.inner().local_storage_path
    }

    pub fn max_document_size_bytes(&self) -> usize {
        self.inner().max_document_size_bytes
    }

    pub fn document_allowed_content_types(&self) -> &[String] {
        &self.inner().document_allowed_content_types
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.inner().gemini_api_key.as_deref()
    }

    pub fn gemini_base_url(&self) -> &str {
        &self.inner().gemini_base_url
    }

    pub fn gemini_timeout_secs(&self) -> u64 {
        self.inner().gemini_timeout_secs
    }
}

impl DocumentServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let max_document_size_bytes = env::var("MAX_DOCUMENT_SIZE_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DOCUMENT_SIZE_BYTES);

        // Exact content types; matching is case-sensitive after parameter stripping
        let document_allowed_content_types = env::var("DOCUMENT_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DocumentKind::allowed_content_types().join(","))
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        Ok(DocumentServiceConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            master_api_key: env::var("MASTER_API_KEY")
                .map_err(|_| anyhow::anyhow!("MASTER_API_KEY must be set"))?,
            storage_backend: env::var("STORAGE_BACKEND")
                .unwrap_or_else(|_| "local".to_string())
                .to_lowercase(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "./storage".to_string()),
            max_document_size_bytes,
            document_allowed_content_types,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(GEMINI_TIMEOUT_SECS),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.master_api_key.len() < MASTER_API_KEY_MIN_LEN {
            return Err(anyhow::anyhow!(
                "MASTER_API_KEY must be at least {} characters long",
                MASTER_API_KEY_MIN_LEN
            ));
        }

        if self.max_document_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_DOCUMENT_SIZE_BYTES must be greater than zero"
            ));
        }

        if self.document_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "DOCUMENT_ALLOWED_CONTENT_TYPES must not be empty"
            ));
        }

        match self.storage_backend.as_str() {
            "local" => {
                if self.local_storage_path.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set for the local storage backend"
                    ));
                }
            }
            other => {
                return Err(anyhow::anyhow!("Unsupported storage backend: {}", other));
            }
        }

        if self.gemini_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "GEMINI_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.gemini_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("GEMINI_BASE_URL must not be empty"));
        }

        Ok(())
    }
}
