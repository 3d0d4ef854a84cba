//! Prompt templates for document analysis.
//!
//! Document text is truncated by character count before being embedded, so
//! prompts stay within the generation model's context window. Truncation is
//! head-only: analyses read the start of the document.

use lexia_core::models::AnalysisKind;

use crate::error::PromptError;

/// Maximum document characters embedded in summary, simplify, and risk prompts.
pub const MAX_ANALYSIS_CHARS: usize = 4000;

/// Maximum document characters embedded in question-answering prompts.
///
/// Lower than [`MAX_ANALYSIS_CHARS`] because the question itself takes up
/// part of the prompt.
pub const MAX_QA_CONTEXT_CHARS: usize = 3000;

/// Build the prompt for one analysis operation.
///
/// `question` is only consulted for [`AnalysisKind::AnswerQuestion`]; a
/// missing or empty question fails with [`PromptError::MissingQuestion`].
pub fn build_prompt(
    kind: AnalysisKind,
    document_text: &str,
    question: Option<&str>,
) -> Result<String, PromptError> {
    match kind {
        AnalysisKind::Summarize => Ok(format!(
            "Please provide a clear, concise summary of this legal document. Focus on:\n\
             1. Main purpose and type of document\n\
             2. Key parties involved\n\
             3. Important terms, dates, and obligations\n\
             4. Key risks or notable clauses\n\
             \n\
             Document text:\n\
             {}",
            truncate_chars(document_text, MAX_ANALYSIS_CHARS)
        )),
        AnalysisKind::Simplify => Ok(format!(
            "Please rewrite this legal text in simple, easy-to-understand language while \
             maintaining the original meaning. Explain any legal jargon and break down \
             complex sentences:\n\
             \n\
             {}",
            truncate_chars(document_text, MAX_ANALYSIS_CHARS)
        )),
        AnalysisKind::IdentifyRisks => Ok(format!(
            "Please analyze this legal document and identify potential risks, concerns, or \
             unfavorable terms. Provide a bullet-pointed list of issues to watch out for:\n\
             \n\
             {}",
            truncate_chars(document_text, MAX_ANALYSIS_CHARS)
        )),
        AnalysisKind::AnswerQuestion => {
            let question = question
                .filter(|q| !q.is_empty())
                .ok_or(PromptError::MissingQuestion)?;

            Ok(format!(
                "Based on the following legal document, please answer this question: {}\n\
                 \n\
                 Document:\n\
                 {}\n\
                 \n\
                 Question: {}\n\
                 \n\
                 Please provide a clear, specific answer based only on the information in \
                 the document.",
                question,
                truncate_chars(document_text, MAX_QA_CONTEXT_CHARS),
                question
            ))
        }
    }
}

/// Take at most `max` characters from the head of `text`.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
