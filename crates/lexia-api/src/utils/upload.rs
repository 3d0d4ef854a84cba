//! Multipart upload extraction and validation.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use lexia_core::error::AppError;

/// A file pulled out of a multipart request body.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: String,
}

fn map_multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File size exceeds the configured limit.".to_string())
    } else {
        AppError::InvalidInput(format!("Invalid multipart payload: {}", e))
    }
}

/// Read the `file` field out of a multipart body.
///
/// Exactly one `file` field is accepted; other fields are skipped. Missing
/// filename or content type fall back to placeholders so validation can
/// reject them with a clear message instead of a parse error.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        if file.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields provided".to_string(),
            ));
        }

        let original_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field.bytes().await.map_err(map_multipart_error)?.to_vec();

        file = Some(UploadedFile {
            data,
            original_name,
            content_type,
        });
    }

    file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}

/// Reject files strictly larger than the configured maximum.
pub fn validate_file_size(size: usize, max_bytes: usize) -> Result<(), AppError> {
    if size > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File size cannot exceed {}MB.",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Strip MIME parameters (anything after the first `;`) and surrounding
/// whitespace. The media type itself is left untouched, casing included.
pub fn normalize_content_type(raw: &str) -> String {
    raw.split(';').next().unwrap_or("").trim().to_string()
}

/// Exact match against the configured allow-list.
pub fn validate_content_type(content_type: &str, allowed: &[String]) -> Result<(), AppError> {
    if allowed.iter().any(|a| a == content_type) {
        return Ok(());
    }
    Err(AppError::UnsupportedMediaType(format!(
        "Unsupported content type: {}",
        content_type
    )))
}

/// Truncate a filename to at most `max_chars` characters, respecting
/// character boundaries.
pub fn truncate_filename(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((idx, _)) => name[..idx].to_string(),
        None => name.to_string(),
    }
}
