//! Lexia Storage Library
//!
//! This crate provides storage abstraction and implementations for Lexia.
//! It includes the Storage trait and a local filesystem implementation.
//!
//! # Storage key format
//!
//! Storage keys are owner-scoped. All backends use the same key layout for consistency:
//!
//! - `documents/{owner_id}/{document_id}.{extension}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all backends stay consistent.

use std::fmt;
use std::str::FromStr;

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            other => Err(StorageError::ConfigError(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }
}
