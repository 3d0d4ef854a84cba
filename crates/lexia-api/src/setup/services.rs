//! Service initialization and application state assembly

use std::sync::Arc;

use anyhow::{Context, Result};
use lexia_ai::{GeminiClient, GeminiConfig};
use lexia_core::Config;
use lexia_db::{ApiKeyRepository, DocumentRepository, UserRepository};
use lexia_storage::Storage;
use sqlx::PgPool;

use crate::state::{AppState, DatabaseConfig, DbState, DocumentConfig, SecurityConfig};

/// Build repositories, the generation client, and the shared application state.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let document_repository = DocumentRepository::new(pool.clone());
    let user_repository = UserRepository::new(pool.clone());
    let api_key_repository = ApiKeyRepository::new(pool.clone());

    let generation = GeminiClient::new(GeminiConfig {
        api_key: config.gemini_api_key().map(String::from),
        base_url: config.gemini_base_url().to_string(),
        timeout_secs: config.gemini_timeout_secs(),
    })
    .context("Failed to build generation client")?;

    if generation.is_configured() {
        tracing::info!("Generation service configured");
    } else {
        tracing::warn!(
            "GEMINI_API_KEY is not set - analysis endpoints will return MISSING_CREDENTIAL"
        );
    }

    let state = Arc::new(AppState {
        db: DbState {
            pool,
            document_repository,
            user_repository,
            api_key_repository,
            database: DatabaseConfig {
                max_connections: config.db_max_connections(),
                timeout_seconds: config.db_timeout_seconds(),
            },
        },
        documents: DocumentConfig {
            storage,
            max_file_size: config.max_document_size_bytes(),
            allowed_content_types: config.document_allowed_content_types().to_vec(),
        },
        security: SecurityConfig {
            cors_origins: config.cors_origins().to_vec(),
        },
        generation: Arc::new(generation),
        config: config.clone(),
        is_production: config.is_production(),
    });

    tracing::info!("Application state initialized");

    Ok(state)
}
