//! Lexia Extract Library
//!
//! Text extraction for the document formats Lexia accepts: PDF, DOCX, and
//! plain text. Extraction is synchronous and CPU-bound; callers running inside
//! an async runtime should wrap [`extract_text`] in `spawn_blocking`.
//!
//! Decoder support is feature-gated (`pdf`, `docx`, both on by default). When
//! a decoder is compiled out, extraction for that format fails with
//! [`ExtractError::CapabilityUnavailable`] instead of panicking, so a slim
//! build still accepts uploads and records the failure per document.

use lexia_core::models::DocumentKind;

#[cfg(feature = "docx")]
mod docx;
pub mod error;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

pub use error::{ExtractError, ExtractResult};

/// Extract plain text from a document body.
///
/// `content_type` must be one of the exact MIME types Lexia accepts; anything
/// else fails with [`ExtractError::UnsupportedType`]. The returned string is
/// trimmed and may be empty when the document contains no extractable text.
pub fn extract_text(content_type: &str, data: &[u8]) -> ExtractResult<String> {
    match DocumentKind::from_content_type(content_type) {
        Some(DocumentKind::Pdf) => {
            #[cfg(feature = "pdf")]
            {
                return pdf::extract(data);
            }
            #[cfg(not(feature = "pdf"))]
            {
                tracing::warn!("PDF extraction requires the pdf feature");
                return Err(ExtractError::CapabilityUnavailable("PDF"));
            }
        }
        Some(DocumentKind::Docx) => {
            #[cfg(feature = "docx")]
            {
                return docx::extract(data);
            }
            #[cfg(not(feature = "docx"))]
            {
                tracing::warn!("DOCX extraction requires the docx feature");
                return Err(ExtractError::CapabilityUnavailable("DOCX"));
            }
        }
        Some(DocumentKind::PlainText) => text::extract(data),
        None => Err(ExtractError::UnsupportedType(content_type.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_content_type_is_unsupported() {
        let result = extract_text("image/png", b"data");
        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));
    }

    #[test]
    fn test_content_type_matching_is_exact() {
        // Parameters and casing are not stripped here; callers normalize first.
        let result = extract_text("text/plain; charset=utf-8", b"data");
        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));

        let result = extract_text("Application/PDF", b"data");
        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));
    }

    #[test]
    fn test_plain_text_dispatch() {
        let text = extract_text("text/plain", b"  hello  ").unwrap();
        assert_eq!(text, "hello");
    }
}
