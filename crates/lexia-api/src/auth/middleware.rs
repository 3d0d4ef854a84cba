//! Bearer-token authentication middleware.
//!
//! Every request under the protected prefix must carry
//! `Authorization: Bearer <key>`. The master key (compared in constant time)
//! resolves to the built-in master user; any other key is hashed and looked
//! up in the `api_keys` table. The resolved [`OwnerContext`] is inserted into
//! request extensions for handlers to extract.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use lexia_core::constants::DEFAULT_USER_ID;
use lexia_core::error::AppError;
use lexia_db::ApiKeyRepository;
use subtle::ConstantTimeEq;
use tracing::{debug, error};

use crate::auth::api_key::hash_api_key;
use crate::auth::models::OwnerContext;
use crate::error::HttpAppError;

/// Authentication state shared by the middleware.
#[derive(Clone)]
pub struct AuthState {
    pub master_api_key: Option<String>,
    pub api_key_repository: ApiKeyRepository,
}

/// Constant-time string comparison to avoid timing side channels on the
/// master key check.
fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn unauthorized(message: &str) -> Response {
    HttpAppError(AppError::Unauthorized(message.to_string())).into_response()
}

pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = match req.headers().get(axum::http::header::AUTHORIZATION) {
        Some(value) => value.to_str().unwrap_or(""),
        None => return unauthorized("Missing Authorization header"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => token,
        _ => return unauthorized("Invalid Authorization header format"),
    };

    if let Some(master) = auth.master_api_key.as_deref() {
        if secure_compare(token, master) {
            debug!("Authenticated with master API key");
            req.extensions_mut().insert(OwnerContext {
                user_id: DEFAULT_USER_ID,
                key_id: None,
            });
            return next.run(req).await;
        }
    }

    let key_hash = hash_api_key(token);
    match auth.api_key_repository.get_by_hash(&key_hash).await {
        Ok(Some(key)) => {
            debug!(user_id = %key.user_id, key_id = %key.id, "Authenticated with API key");
            req.extensions_mut().insert(OwnerContext {
                user_id: key.user_id,
                key_id: Some(key.id),
            });
            next.run(req).await
        }
        Ok(None) => unauthorized("Invalid API key"),
        Err(e) => {
            error!("Failed to look up API key: {}", e);
            HttpAppError(e).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_compare_matches_equal_strings() {
        assert!(secure_compare("lx_live_abc", "lx_live_abc"));
    }

    #[test]
    fn test_secure_compare_rejects_different_strings() {
        assert!(!secure_compare("lx_live_abc", "lx_live_abd"));
        assert!(!secure_compare("lx_live_abc", "lx_live_ab"));
        assert!(!secure_compare("", "x"));
    }
}
