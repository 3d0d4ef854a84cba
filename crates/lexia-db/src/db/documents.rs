use lexia_core::{
    models::{Document, ProcessingStatus},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing documents
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new document record in `pending` state
    ///
    /// The id is generated by the caller because the storage key embeds it
    /// and the file is uploaded before the row exists.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "insert", db.record_id = %id))]
    pub async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        original_name: &str,
        file_type: &str,
        file_size: i64,
        storage_key: &str,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            INSERT INTO documents (id, user_id, original_name, file_type, file_size, storage_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(original_name)
        .bind(file_type)
        .bind(file_size)
        .bind(storage_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// Get a document by ID, scoped to its owner
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            "SELECT * FROM documents WHERE user_id = $1 AND id = $2",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// List the owner's documents, newest upload first
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn list(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<Postgres, Document>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Delete a document row, scoped to its owner
    ///
    /// Returns the deleted row so the caller can remove the stored file.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            "DELETE FROM documents WHERE user_id = $1 AND id = $2 RETURNING *",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Move a document to `processing` before extraction starts
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    pub async fn mark_processing(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE documents SET processing_status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(ProcessingStatus::Processing)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Record successful extraction: text and `completed` status in one update
    #[tracing::instrument(skip(self, text), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    pub async fn complete_extraction(&self, id: Uuid, text: &str) -> Result<Document, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            UPDATE documents
            SET extracted_text = $2, processing_status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(text)
        .bind(ProcessingStatus::Completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// Record failed extraction: clear any text and mark `failed`
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    pub async fn fail_extraction(&self, id: Uuid) -> Result<Document, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            UPDATE documents
            SET extracted_text = NULL, processing_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ProcessingStatus::Failed)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }
}
