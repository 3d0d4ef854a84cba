//! User provisioning handlers
//!
//! Users are onboarded by the operator with the master key. Creating a user
//! also mints its first API key so working credentials come back in one step.

use crate::auth::api_key::{generate_api_key, hash_api_key};
use crate::auth::OwnerContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use lexia_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub id: Uuid,
    pub name: String,
    /// The user's first API key; shown exactly once.
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// Create a user and their first API key. Master key only.
#[tracing::instrument(skip(state))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !owner.is_master() {
        return Err(HttpAppError::from(AppError::Unauthorized(
            "Only the master API key can create users".to_string(),
        )));
    }

    request.validate().map_err(AppError::from)?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(HttpAppError::from(AppError::BadRequest(
            "name is required".to_string(),
        )));
    }

    let user = state.db.user_repository.create(name).await?;

    let raw_key = generate_api_key();
    let key_hash = hash_api_key(&raw_key);
    state
        .db
        .api_key_repository
        .create(user.id, &key_hash, "default")
        .await?;

    tracing::info!(user_id = %user.id, "User created");

    let response = CreateUserResponse {
        id: user.id,
        name: user.name,
        api_key: raw_key,
        created_at: user.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
