//! Route configuration and middleware stack

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use lexia_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::{API_PREFIX, UPLOAD_OVERHEAD_BYTES};
use crate::handlers;
use crate::middleware::request_id::request_id_middleware;
use crate::state::AppState;

/// Assemble the application router: public routes, authenticated routes,
/// interactive docs, and the shared middleware stack.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let cors = setup_cors(config);

    let auth_state = AuthState {
        master_api_key: Some(config.master_api_key().to_string()),
        api_key_repository: state.db.api_key_repository.clone(),
    };

    // Public routes (no authentication required)
    let public_routes = public_routes(state.clone());

    // Protected routes (require authentication)
    // State is applied inside the sub-routers so body-consuming extractors
    // (Multipart) keep working under the auth layer
    let protected_routes = protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(auth_state, auth_middleware),
    );

    let app_state_routes = public_routes.merge(protected_routes);

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    app_state_routes
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(
            config.max_document_size_bytes() + UPLOAD_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    }
}

/// Public routes (no authentication required)
fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state)
}

/// Protected routes (require authentication)
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(document_routes(state.clone()))
        .merge(analysis_routes(state.clone()))
        .merge(api_key_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .with_state(state)
}

/// Document CRUD and file retrieval
fn document_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/documents", API_PREFIX),
            post(handlers::documents::upload_document),
        )
        .route(
            &format!("{}/documents", API_PREFIX),
            get(handlers::documents::list_documents),
        )
        .route(
            &format!("{}/documents/{{id}}", API_PREFIX),
            get(handlers::documents::get_document),
        )
        .route(
            &format!("{}/documents/{{id}}", API_PREFIX),
            delete(handlers::documents::delete_document),
        )
        .route(
            &format!("{}/documents/{{id}}/file", API_PREFIX),
            get(handlers::documents::download_document),
        )
        .with_state(state)
}

/// AI analysis operations over a document's extracted text
fn analysis_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/documents/{{id}}/summary", API_PREFIX),
            post(handlers::analysis::summarize_document),
        )
        .route(
            &format!("{}/documents/{{id}}/simplify", API_PREFIX),
            post(handlers::analysis::simplify_document),
        )
        .route(
            &format!("{}/documents/{{id}}/risks", API_PREFIX),
            post(handlers::analysis::identify_risks),
        )
        .route(
            &format!("{}/documents/{{id}}/qa", API_PREFIX),
            post(handlers::analysis::answer_question),
        )
        .with_state(state)
}

/// API key management
fn api_key_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/api-keys", API_PREFIX),
            post(handlers::api_keys::create_api_key),
        )
        .route(
            &format!("{}/api-keys", API_PREFIX),
            get(handlers::api_keys::list_api_keys),
        )
        .route(
            &format!("{}/api-keys/{{id}}", API_PREFIX),
            delete(handlers::api_keys::revoke_api_key),
        )
        .with_state(state)
}

/// User provisioning (master key only)
fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/users", API_PREFIX),
            post(handlers::users::create_user),
        )
        .with_state(state)
}

#[derive(serde::Serialize)]
struct HealthCheckResponse {
    status: String,
    database: String,
    storage: String,
}

/// Health check probing the database and storage backend.
///
/// A database failure makes the service unhealthy (503). Storage problems are
/// reported but degrade gracefully since uploads are the only affected path.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = HealthCheckResponse {
        status: "healthy".to_string(),
        database: "unknown".to_string(),
        storage: "unknown".to_string(),
    };

    let mut overall_healthy = true;

    // Check database using the pool directly with timeout
    match tokio::time::timeout(TIMEOUT, sqlx::query("SELECT 1").execute(&state.db.pool)).await {
        Ok(Ok(_)) => {
            response.database = "healthy".to_string();
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database health check failed");
            response.database = format!("unhealthy: {}", e);
            overall_healthy = false;
        }
        Err(_) => {
            tracing::error!("Database health check timed out");
            response.database = "timeout".to_string();
            overall_healthy = false;
        }
    }

    // Lightweight storage connectivity check with a key that never exists
    match tokio::time::timeout(
        TIMEOUT,
        state.documents.storage.exists("health-check-non-existent-key"),
    )
    .await
    {
        Ok(Ok(_)) => {
            response.storage = "healthy".to_string();
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Storage health check warning");
            response.storage = format!("degraded: {}", e);
        }
        Err(_) => {
            tracing::warn!("Storage health check timed out");
            response.storage = "timeout".to_string();
        }
    }

    if !overall_healthy {
        response.status = "unhealthy".to_string();
    }

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
