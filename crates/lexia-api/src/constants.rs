//! API constants.

/// API base path prefix for versioned routes.
pub const API_PREFIX: &str = "/api/v1";

/// Longest original filename stored with a document. The documents table
/// declares `original_name VARCHAR(255)`; names are truncated to fit rather
/// than rejected.
pub const MAX_ORIGINAL_NAME_CHARS: usize = 255;

/// Headroom added on top of the document size limit when capping the HTTP
/// request body, so multipart boundaries and form metadata do not count
/// against the file itself. Oversized files are still rejected by the exact
/// per-file check in the upload path.
pub const UPLOAD_OVERHEAD_BYTES: usize = 1024 * 1024;
