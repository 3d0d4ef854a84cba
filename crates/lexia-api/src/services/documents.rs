//! Document lifecycle orchestration.
//!
//! The service ties together validation, storage, the database, extraction,
//! and generation. Handlers stay thin: they extract request parts, call one
//! service method, and shape the response.

use std::sync::Arc;

use axum::extract::Multipart;
use lexia_ai::build_prompt;
use lexia_core::error::AppError;
use lexia_core::models::{AnalysisKind, Document, DocumentKind};
use lexia_storage::{keys, StorageError};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::OwnerContext;
use crate::constants::MAX_ORIGINAL_NAME_CHARS;
use crate::state::AppState;
use crate::utils::upload::{
    extract_multipart_file, normalize_content_type, truncate_filename, validate_content_type,
    validate_file_size,
};

/// Map storage failures onto the API error surface. A missing object is a
/// 404 (the record exists but the file is gone); everything else surfaces as
/// a storage failure.
fn storage_error(e: StorageError) -> AppError {
    match e {
        StorageError::NotFound(_) => AppError::NotFound("Document file not found".to_string()),
        other => AppError::Storage(other.to_string()),
    }
}

#[derive(Clone)]
pub struct DocumentService {
    state: Arc<AppState>,
}

impl DocumentService {
    pub fn new(state: &Arc<AppState>) -> Self {
        DocumentService {
            state: Arc::clone(state),
        }
    }

    /// Handle one upload end to end: validate, persist the original file,
    /// create the record, and run extraction before returning.
    ///
    /// The returned document carries its final processing status; callers
    /// never observe `pending` or `processing` from this path.
    pub async fn submit(
        &self,
        owner: &OwnerContext,
        multipart: Multipart,
    ) -> Result<Document, AppError> {
        let file = extract_multipart_file(multipart).await?;

        validate_file_size(file.data.len(), self.state.documents.max_file_size)?;

        let content_type = normalize_content_type(&file.content_type);
        validate_content_type(&content_type, &self.state.documents.allowed_content_types)?;

        let extension = DocumentKind::from_content_type(&content_type)
            .map(|kind| kind.extension())
            .unwrap_or("bin");

        let document_id = Uuid::new_v4();
        let storage_key = keys::document_key(owner.user_id, document_id, extension);

        self.state
            .documents
            .storage
            .upload(&storage_key, file.data.clone())
            .await
            .map_err(storage_error)?;

        let original_name = truncate_filename(&file.original_name, MAX_ORIGINAL_NAME_CHARS);
        let document = match self
            .state
            .db
            .document_repository
            .create(
                document_id,
                owner.user_id,
                &original_name,
                &content_type,
                file.data.len() as i64,
                &storage_key,
            )
            .await
        {
            Ok(document) => document,
            Err(e) => {
                // Without the record the uploaded object is unreachable;
                // remove it so failed uploads leave nothing behind.
                if let Err(cleanup) = self.state.documents.storage.delete(&storage_key).await {
                    warn!(%storage_key, "Failed to clean up orphaned upload: {}", cleanup);
                }
                return Err(e);
            }
        };

        info!(
            document_id = %document.id,
            user_id = %owner.user_id,
            file_type = %content_type,
            file_size = file.data.len(),
            "Document uploaded"
        );

        self.run_extraction(document, content_type, file.data).await
    }

    /// Run extraction synchronously and record the outcome.
    ///
    /// Extraction failures are terminal per document, not request errors:
    /// the upload still succeeds and the record lands in `failed`.
    async fn run_extraction(
        &self,
        document: Document,
        content_type: String,
        data: Vec<u8>,
    ) -> Result<Document, AppError> {
        let repository = &self.state.db.document_repository;
        repository.mark_processing(document.id).await?;

        let extraction =
            tokio::task::spawn_blocking(move || lexia_extract::extract_text(&content_type, &data))
                .await;

        match extraction {
            Ok(Ok(text)) if !text.is_empty() => {
                let document = repository.complete_extraction(document.id, &text).await?;
                info!(document_id = %document.id, bytes = text.len(), "Extraction completed");
                Ok(document)
            }
            Ok(Ok(_)) => {
                warn!(document_id = %document.id, "Extraction produced no text");
                repository.fail_extraction(document.id).await
            }
            Ok(Err(e)) => {
                warn!(document_id = %document.id, "Extraction failed: {}", e);
                repository.fail_extraction(document.id).await
            }
            Err(join_error) => {
                error!(document_id = %document.id, "Extraction task panicked: {}", join_error);
                repository.fail_extraction(document.id).await
            }
        }
    }

    pub async fn get(&self, owner: &OwnerContext, id: Uuid) -> Result<Document, AppError> {
        self.state
            .db
            .document_repository
            .get(owner.user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))
    }

    pub async fn list(
        &self,
        owner: &OwnerContext,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Document>, AppError> {
        self.state
            .db
            .document_repository
            .list(owner.user_id, limit, offset)
            .await
    }

    /// Fetch a document plus its original file content.
    pub async fn download(
        &self,
        owner: &OwnerContext,
        id: Uuid,
    ) -> Result<(Document, Vec<u8>), AppError> {
        let document = self.get(owner, id).await?;

        let data = self
            .state
            .documents
            .storage
            .download(&document.storage_key)
            .await
            .map_err(storage_error)?;

        Ok((document, data))
    }

    /// Delete the record, then the stored file. Storage deletion failures
    /// are logged and swallowed; the record is already gone.
    pub async fn delete(&self, owner: &OwnerContext, id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .state
            .db
            .document_repository
            .delete(owner.user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        if let Err(e) = self
            .state
            .documents
            .storage
            .delete(&deleted.storage_key)
            .await
        {
            warn!(document_id = %id, "Failed to delete stored file: {}", e);
        }

        info!(document_id = %id, user_id = %owner.user_id, "Document deleted");
        Ok(())
    }

    /// Run one analysis operation against a document's extracted text.
    ///
    /// Ownership and text availability are checked before the question is
    /// looked at, so a missing document reports 404 even when the request
    /// body is also invalid.
    pub async fn analyze(
        &self,
        owner: &OwnerContext,
        id: Uuid,
        kind: AnalysisKind,
        question: Option<&str>,
    ) -> Result<String, AppError> {
        let text = self.load_text(owner, id).await?;
        let prompt = build_prompt(kind, &text, question)?;
        let analysis = self.state.generation.generate(&prompt).await?;

        info!(document_id = %id, kind = ?kind, "Analysis generated");
        Ok(analysis)
    }

    async fn load_text(&self, owner: &OwnerContext, id: Uuid) -> Result<String, AppError> {
        let document = self.get(owner, id).await?;

        if !document.has_text() {
            return Err(AppError::TextUnavailable(format!(
                "processing status is {}",
                document.processing_status
            )));
        }

        Ok(document.extracted_text.unwrap_or_default())
    }
}
