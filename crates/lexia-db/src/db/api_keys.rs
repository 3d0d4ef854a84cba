use lexia_core::{models::ApiKey, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing API keys
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new API key hash for a user
    #[tracing::instrument(skip(self, key_hash), fields(db.table = "api_keys", db.operation = "insert"))]
    pub async fn create(
        &self,
        user_id: Uuid,
        key_hash: &str,
        name: &str,
    ) -> Result<ApiKey, AppError> {
        let api_key = sqlx::query_as::<Postgres, ApiKey>(
            r#"
            INSERT INTO api_keys (user_id, key_hash, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(key_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(api_key)
    }

    /// Look up a key by its hash (authentication path)
    #[tracing::instrument(skip(self, key_hash), fields(db.table = "api_keys", db.operation = "select"))]
    pub async fn get_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, AppError> {
        let api_key =
            sqlx::query_as::<Postgres, ApiKey>("SELECT * FROM api_keys WHERE key_hash = $1")
                .bind(key_hash)
                .fetch_optional(&self.pool)
                .await?;

        Ok(api_key)
    }

    /// List a user's keys
    #[tracing::instrument(skip(self), fields(db.table = "api_keys", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApiKey>, AppError> {
        let keys = sqlx::query_as::<Postgres, ApiKey>(
            "SELECT * FROM api_keys WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    /// Revoke a key, scoped to its owner
    #[tracing::instrument(skip(self), fields(db.table = "api_keys", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM api_keys WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
