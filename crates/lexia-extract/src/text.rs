use crate::error::ExtractResult;

/// Decode a plain-text body.
///
/// UTF-8 first; bytes that are not valid UTF-8 fall back to Latin-1, where
/// every byte maps to the code point of the same value. Decoding therefore
/// never fails.
pub(crate) fn extract(data: &[u8]) -> ExtractResult<String> {
    let text = match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::debug!("Plain text is not valid UTF-8, decoding as Latin-1");
            data.iter().map(|&b| b as char).collect()
        }
    };

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_decodes_and_trims() {
        let text = extract("  caf\u{e9} agreement \n".as_bytes()).unwrap();
        assert_eq!(text, "caf\u{e9} agreement");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_latin1() {
        // 0xE9 is 'e' acute in Latin-1 but an invalid UTF-8 start byte here.
        let text = extract(&[b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(text, "caf\u{e9}");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        let text = extract(b" \t\n ").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_empty_input_is_empty() {
        let text = extract(b"").unwrap();
        assert_eq!(text, "");
    }
}
