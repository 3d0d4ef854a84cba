use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Extraction lifecycle of an uploaded document.
///
/// `Pending` is the only initial state, set at record creation. `Completed`
/// and `Failed` are terminal. `Processing` is transient (extraction runs
/// synchronously inside the upload request) but is modeled as a real state so
/// an asynchronous pipeline would not change this contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "processing_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// No transition leaves `Completed` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStatus::Completed | ProcessingStatus::Failed)
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStatus::Pending => write!(f, "pending"),
            ProcessingStatus::Processing => write!(f, "processing"),
            ProcessingStatus::Completed => write!(f, "completed"),
            ProcessingStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Supported document kinds, keyed on the declared content type.
///
/// The mapping requires an exact match (after media-type parameters have been
/// stripped); anything else is rejected before content is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub const PDF_CONTENT_TYPE: &'static str = "application/pdf";
    pub const DOCX_CONTENT_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const TEXT_CONTENT_TYPE: &'static str = "text/plain";

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            Self::PDF_CONTENT_TYPE => Some(DocumentKind::Pdf),
            Self::DOCX_CONTENT_TYPE => Some(DocumentKind::Docx),
            Self::TEXT_CONTENT_TYPE => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// The full upload allow-list.
    pub fn allowed_content_types() -> [&'static str; 3] {
        [
            Self::PDF_CONTENT_TYPE,
            Self::DOCX_CONTENT_TYPE,
            Self::TEXT_CONTENT_TYPE,
        ]
    }

    /// Canonical file extension for storage key generation.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::PlainText => "txt",
        }
    }
}

/// One uploaded legal document and its derived state.
///
/// Invariant: `extracted_text` is non-null if and only if `processing_status`
/// is `Completed`. The record is mutated exactly once after creation, by the
/// extraction step, and never again except deletion by the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub storage_key: String,
    pub extracted_text: Option<String>,
    pub processing_status: ProcessingStatus,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Whether analysis operations may run against this document.
    pub fn has_text(&self) -> bool {
        self.processing_status == ProcessingStatus::Completed && self.extracted_text.is_some()
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_content_type(&self.file_type)
    }
}

/// Document summary record returned by the API. Extracted text is never
/// included; it is only reachable through the analysis operations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub original_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub processing_status: ProcessingStatus,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        DocumentResponse {
            id: doc.id,
            original_name: doc.original_name,
            file_type: doc.file_type,
            file_size: doc.file_size,
            uploaded_at: doc.uploaded_at,
            processing_status: doc.processing_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_document(status: ProcessingStatus, text: Option<&str>) -> Document {
        Document {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            original_name: "contract.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            file_size: 2048,
            storage_key: "documents/u/contract_123.pdf".to_string(),
            extracted_text: text.map(|t| t.to_string()),
            processing_status: status,
            uploaded_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_kind_exact_content_type_match() {
        assert_eq!(
            DocumentKind::from_content_type("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_content_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentKind::Docx)
        );
        assert_eq!(
            DocumentKind::from_content_type("text/plain"),
            Some(DocumentKind::PlainText)
        );
        // No partial or case-insensitive matching
        assert_eq!(DocumentKind::from_content_type("Application/PDF"), None);
        assert_eq!(DocumentKind::from_content_type("application/msword"), None);
        assert_eq!(DocumentKind::from_content_type("image/png"), None);
        assert_eq!(DocumentKind::from_content_type(""), None);
    }

    #[test]
    fn test_document_kind_extensions() {
        assert_eq!(DocumentKind::Pdf.extension(), "pdf");
        assert_eq!(DocumentKind::Docx.extension(), "docx");
        assert_eq!(DocumentKind::PlainText.extension(), "txt");
    }

    #[test]
    fn test_processing_status_terminal_states() {
        assert!(!ProcessingStatus::Pending.is_terminal());
        assert!(!ProcessingStatus::Processing.is_terminal());
        assert!(ProcessingStatus::Completed.is_terminal());
        assert!(ProcessingStatus::Failed.is_terminal());
    }

    #[test]
    fn test_processing_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProcessingStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let parsed: ProcessingStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, ProcessingStatus::Failed);
    }

    #[test]
    fn test_has_text_requires_completed_and_text() {
        assert!(test_document(ProcessingStatus::Completed, Some("body")).has_text());
        assert!(!test_document(ProcessingStatus::Failed, None).has_text());
        assert!(!test_document(ProcessingStatus::Pending, None).has_text());
        // A half-written record never passes the gate
        assert!(!test_document(ProcessingStatus::Completed, None).has_text());
        assert!(!test_document(ProcessingStatus::Processing, Some("body")).has_text());
    }

    #[test]
    fn test_document_response_from_document() {
        let doc = test_document(ProcessingStatus::Completed, Some("full text"));
        let id = doc.id;
        let response = DocumentResponse::from(doc);

        assert_eq!(response.id, id);
        assert_eq!(response.original_name, "contract.pdf");
        assert_eq!(response.file_type, "application/pdf");
        assert_eq!(response.file_size, 2048);
        assert_eq!(response.processing_status, ProcessingStatus::Completed);

        // The response shape never leaks extracted text or the storage key
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("extracted_text").is_none());
        assert!(json.get("storage_key").is_none());
    }
}
