//! Configuration validation
//!
//! Startup-time checks for values that would otherwise fail at first use,
//! long after the process looks healthy.

use anyhow::Result;
use lexia_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    // Core invariants (master key length, size limits, storage backend,
    // generation settings) live with the config itself.
    config.validate()?;

    // Validate CORS configuration in production
    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Set specific allowed origins via the CORS_ORIGINS environment variable."
        ));
    }

    // Validate database connection settings
    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    Ok(())
}
