//! AI analysis handlers.
//!
//! Each operation loads the document's extracted text, builds one prompt, and
//! makes one generation call. Nothing is cached or persisted; repeating a
//! request repeats the generation call.

use crate::auth::OwnerContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::DocumentService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use lexia_core::models::{
    AnalysisKind, AnswerResponse, QuestionRequest, RisksResponse, SimplifyResponse,
    SummaryResponse,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/summary",
    tag = "analysis",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "Document text not available", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Generation service not configured", body = ErrorResponse),
        (status = 502, description = "Generation failed or returned no content", body = ErrorResponse),
        (status = 504, description = "Generation timed out", body = ErrorResponse)
    )
)]
pub async fn summarize_document(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = DocumentService::new(&state);
    let summary = service
        .analyze(&owner, id, AnalysisKind::Summarize, None)
        .await?;

    Ok(Json(SummaryResponse { summary }))
}

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/simplify",
    tag = "analysis",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Simplified text generated", body = SimplifyResponse),
        (status = 400, description = "Document text not available", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Generation service not configured", body = ErrorResponse),
        (status = 502, description = "Generation failed or returned no content", body = ErrorResponse),
        (status = 504, description = "Generation timed out", body = ErrorResponse)
    )
)]
pub async fn simplify_document(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = DocumentService::new(&state);
    let simplified_text = service
        .analyze(&owner, id, AnalysisKind::Simplify, None)
        .await?;

    Ok(Json(SimplifyResponse { simplified_text }))
}

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/risks",
    tag = "analysis",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Risk analysis generated", body = RisksResponse),
        (status = 400, description = "Document text not available", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Generation service not configured", body = ErrorResponse),
        (status = 502, description = "Generation failed or returned no content", body = ErrorResponse),
        (status = 504, description = "Generation timed out", body = ErrorResponse)
    )
)]
pub async fn identify_risks(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = DocumentService::new(&state);
    let risks = service
        .analyze(&owner, id, AnalysisKind::IdentifyRisks, None)
        .await?;

    Ok(Json(RisksResponse { risks }))
}

#[utoipa::path(
    post,
    path = "/api/v1/documents/{id}/qa",
    tag = "analysis",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Answer generated", body = AnswerResponse),
        (status = 400, description = "Question missing or document text not available", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Generation service not configured", body = ErrorResponse),
        (status = 502, description = "Generation failed or returned no content", body = ErrorResponse),
        (status = 504, description = "Generation timed out", body = ErrorResponse)
    )
)]
pub async fn answer_question(
    State(state): State<Arc<AppState>>,
    owner: OwnerContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<QuestionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = DocumentService::new(&state);
    // Document lookup runs first: an unknown id is a 404 even when the
    // question is also missing.
    let answer = service
        .analyze(
            &owner,
            id,
            AnalysisKind::AnswerQuestion,
            request.question.as_deref(),
        )
        .await?;

    Ok(Json(AnswerResponse {
        question: request.question.unwrap_or_default(),
        answer,
    }))
}
