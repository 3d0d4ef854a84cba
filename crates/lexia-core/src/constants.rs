//! Shared constants for upload limits and credentials.

use uuid::Uuid;

/// Default maximum accepted document size in bytes (10 MiB).
/// A file strictly larger than this is rejected; a file of exactly this size
/// is accepted.
pub const DEFAULT_MAX_DOCUMENT_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Built-in user that master-key requests act as. Seeded by the initial
/// migration so documents it uploads satisfy the ownership foreign key.
pub const DEFAULT_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001);

/// Minimum length of the master API key. Shorter keys are rejected at startup.
pub const MASTER_API_KEY_MIN_LEN: usize = 32;

/// Prefix for user-issued API keys.
pub const API_KEY_PREFIX: &str = "lx_live_";
