//! Lexia Database Library
//!
//! Repository implementations for the data access layer. Every query that
//! touches user-owned rows is owner-scoped in SQL, so a repository can never
//! return another user's document regardless of what the caller passes.

pub mod db;

pub use db::{ApiKeyRepository, DocumentRepository, UserRepository};
