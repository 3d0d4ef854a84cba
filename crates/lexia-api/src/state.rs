//! Application state shared across handlers.
//!
//! `AppState` aggregates focused sub-states so handlers can borrow only what
//! they need; `FromRef` impls let axum extract a sub-state directly.

use std::sync::Arc;

use lexia_ai::GeminiClient;
use lexia_core::Config;
use lexia_db::{ApiKeyRepository, DocumentRepository, UserRepository};
use lexia_storage::Storage;
use sqlx::PgPool;

/// Database connection settings carried into state for diagnostics.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub document_repository: DocumentRepository,
    pub user_repository: UserRepository,
    pub api_key_repository: ApiKeyRepository,
    pub database: DatabaseConfig,
}

/// Document upload constraints and the storage backend behind them.
#[derive(Clone)]
pub struct DocumentConfig {
    pub storage: Arc<dyn Storage>,
    pub max_file_size: usize,
    pub allowed_content_types: Vec<String>,
}

/// Security-related configuration.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

/// Aggregated application state.
pub struct AppState {
    pub db: DbState,
    pub documents: DocumentConfig,
    pub security: SecurityConfig,
    pub generation: Arc<GeminiClient>,
    pub config: Config,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for DocumentConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.documents.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for SecurityConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.security.clone()
    }
}

// Compile-time check that AppState stays usable from axum's shared-state
// position (spawned tasks, extractors).
#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
