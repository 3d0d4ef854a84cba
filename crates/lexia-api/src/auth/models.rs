use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

/// Identity attached to a request after authentication, stored in request
/// extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct OwnerContext {
    /// Owner every document operation is scoped to.
    pub user_id: Uuid,
    /// The API key that authenticated the request; `None` when the master
    /// key was used.
    pub key_id: Option<Uuid>,
}

impl OwnerContext {
    pub fn is_master(&self) -> bool {
        self.key_id.is_none()
    }
}

// Implement FromRequestParts for OwnerContext to work with Multipart
// Extension cannot be used with Multipart, so we extract directly from request parts
impl<S> FromRequestParts<S> for OwnerContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OwnerContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing owner context".to_string(),
                        details: None,
                        error_type: None,
                        code: "MISSING_OWNER_CONTEXT".to_string(),
                        recoverable: false,
                        suggested_action: Some("Check API key or authentication token".to_string()),
                    }),
                )
            })
    }
}
