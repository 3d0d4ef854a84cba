//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain.

mod analysis;
mod document;
mod user;

// Re-export all models for convenient imports
pub use analysis::*;
pub use document::*;
pub use user::*;
