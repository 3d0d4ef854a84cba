//! API key management handlers
//!
//! Create, list, and revoke API keys. Keys are owned by the calling user and
//! can be used for authentication instead of the master API key.

use crate::auth::api_key::{
    generate_api_key, hash_api_key, ApiKeyResponse, CreateApiKeyRequest, CreateApiKeyResponse,
};
use crate::auth::OwnerContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use lexia_core::AppError;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Create a new API key for the calling user
#[tracing::instrument(skip(state))]
pub async fn create_api_key(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    ValidatedJson(request): ValidatedJson<CreateApiKeyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(HttpAppError::from(AppError::BadRequest(
            "name is required".to_string(),
        )));
    }

    let raw_key = generate_api_key();
    let key_hash = hash_api_key(&raw_key);

    let api_key = state
        .db
        .api_key_repository
        .create(owner.user_id, &key_hash, name)
        .await?;

    tracing::info!(user_id = %owner.user_id, key_id = %api_key.id, "API key created");

    // The raw key is returned exactly once; only its hash is stored.
    let response = CreateApiKeyResponse {
        id: api_key.id,
        api_key: raw_key,
        name: api_key.name,
        created_at: api_key.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List API keys for the calling user
#[tracing::instrument(skip(state))]
pub async fn list_api_keys(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let api_keys = state
        .db
        .api_key_repository
        .list_for_user(owner.user_id)
        .await?;

    let response: Vec<ApiKeyResponse> = api_keys.into_iter().map(ApiKeyResponse::from).collect();

    Ok(Json(response))
}

/// Revoke an API key owned by the calling user
#[tracing::instrument(skip(state))]
pub async fn revoke_api_key(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let revoked = state.db.api_key_repository.delete(owner.user_id, id).await?;

    if !revoked {
        return Err(HttpAppError::from(AppError::NotFound(
            "API key not found".to_string(),
        )));
    }

    tracing::info!(user_id = %owner.user_id, key_id = %id, "API key revoked");

    #[derive(serde::Serialize)]
    struct RevokeResponse {
        message: &'static str,
        id: Uuid,
    }

    Ok(Json(RevokeResponse {
        message: "API key revoked successfully",
        id,
    }))
}
