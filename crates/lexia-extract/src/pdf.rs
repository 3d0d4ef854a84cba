use crate::error::{ExtractError, ExtractResult};

/// Extract text from a PDF body, page by page, joined with newlines.
pub(crate) fn extract(data: &[u8]) -> ExtractResult<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| ExtractError::Malformed(format!("PDF parsing failed: {}", e)))?;

    let text = pages.join("\n");
    let trimmed = text.trim();

    if trimmed.is_empty() {
        tracing::warn!(pages = pages.len(), "PDF text extraction returned empty");
    } else {
        tracing::debug!(
            pages = pages.len(),
            text_len = trimmed.len(),
            "PDF text extracted"
        );
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_malformed() {
        let result = extract(b"this is not a pdf");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let result = extract(b"");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_truncated_header_is_malformed() {
        // A bare header with no xref table or trailer.
        let result = extract(b"%PDF-1.7\n");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }
}
