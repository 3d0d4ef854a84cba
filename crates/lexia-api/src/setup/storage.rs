//! Storage setup and initialization

use std::sync::Arc;

use anyhow::{Context, Result};
use lexia_core::Config;
use lexia_storage::{create_storage, Storage};

/// Initialize the storage backend named by the configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config.storage_backend(), config.local_storage_path())
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = config.storage_backend(),
        path = config.local_storage_path(),
        "Storage backend initialized"
    );

    Ok(storage)
}
