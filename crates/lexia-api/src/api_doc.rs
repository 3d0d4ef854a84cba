//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use lexia_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lexia API",
        version = "0.1.0",
        description = "Legal document analysis API. Upload PDF, DOCX, or TXT documents, then request AI-generated summaries, plain-language rewrites, risk analysis, and question answering. All endpoints are versioned under /api/v1/."
    ),
    paths(
        // Documents
        handlers::documents::upload_document,
        handlers::documents::list_documents,
        handlers::documents::get_document,
        handlers::documents::download_document,
        handlers::documents::delete_document,
        // Analysis
        handlers::analysis::summarize_document,
        handlers::analysis::simplify_document,
        handlers::analysis::identify_risks,
        handlers::analysis::answer_question,
    ),
    components(
        schemas(
            // Core models
            models::ProcessingStatus,
            models::DocumentResponse,
            models::QuestionRequest,
            models::SummaryResponse,
            models::SimplifyResponse,
            models::RisksResponse,
            models::AnswerResponse,
            // Query params
            handlers::documents::PaginationQuery,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "documents", description = "Document upload, management, and download operations"),
        (name = "analysis", description = "AI analysis of extracted document text")
    )
)]
pub struct ApiDoc;
