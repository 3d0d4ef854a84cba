use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The four AI analysis operations. The kind selects the prompt template and
/// the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Summarize,
    Simplify,
    IdentifyRisks,
    AnswerQuestion,
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisKind::Summarize => write!(f, "summarize"),
            AnalysisKind::Simplify => write!(f, "simplify"),
            AnalysisKind::IdentifyRisks => write!(f, "identify_risks"),
            AnalysisKind::AnswerQuestion => write!(f, "answer_question"),
        }
    }
}

/// Request body for the question-answering operation.
///
/// The question is optional at the serde level so its absence surfaces as a
/// `MISSING_PARAMETER` error instead of a generic deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QuestionRequest {
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SimplifyResponse {
    pub simplified_text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RisksResponse {
    pub risks: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_kind_display() {
        assert_eq!(AnalysisKind::Summarize.to_string(), "summarize");
        assert_eq!(AnalysisKind::AnswerQuestion.to_string(), "answer_question");
    }

    #[test]
    fn test_question_request_tolerates_missing_field() {
        let parsed: QuestionRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.question.is_none());

        let parsed: QuestionRequest =
            serde_json::from_str(r#"{"question": "What is the notice period?"}"#).unwrap();
        assert_eq!(parsed.question.as_deref(), Some("What is the notice period?"));
    }

    #[test]
    fn test_answer_response_shape() {
        let response = AnswerResponse {
            question: "Who are the parties?".to_string(),
            answer: "Acme Corp and the tenant.".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["question"], "Who are the parties?");
        assert_eq!(json["answer"], "Acme Corp and the tenant.");
    }
}
