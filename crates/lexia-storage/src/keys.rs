//! Shared key generation for storage backends.
//!
//! Key format: `documents/{owner_id}/{document_id}.{extension}`.

use uuid::Uuid;

/// Generate a storage key for a document owned by the given user.
///
/// Keys embed the document id rather than the client-supplied filename, so
/// uploads can never collide and the key is always traversal-safe. All
/// backends must use this format for consistency.
pub fn document_key(owner_id: Uuid, document_id: Uuid, extension: &str) -> String {
    format!("documents/{}/{}.{}", owner_id, document_id, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_format() {
        let owner = Uuid::nil();
        let doc = Uuid::nil();
        assert_eq!(
            document_key(owner, doc, "pdf"),
            format!("documents/{}/{}.pdf", owner, doc)
        );
    }

    #[test]
    fn test_document_key_has_no_traversal() {
        let key = document_key(Uuid::new_v4(), Uuid::new_v4(), "txt");
        assert!(!key.contains(".."));
        assert!(!key.starts_with('/'));
    }
}
