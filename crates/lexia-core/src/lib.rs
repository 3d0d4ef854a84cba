//! Lexia Core Library
//!
//! This crate provides the core domain models, error types, and configuration
//! that are shared across all Lexia components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DocumentServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
