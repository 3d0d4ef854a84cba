//! Lexia AI Library
//!
//! Prompt construction and the generation client used for document analysis.
//! Each analysis operation builds one prompt from the document's extracted
//! text and makes a single call to the generation API; there is no retry or
//! queueing at this layer. Callers decide how failures map to their own
//! error surface.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{GenerationError, PromptError};
pub use prompt::{build_prompt, MAX_ANALYSIS_CHARS, MAX_QA_CONTEXT_CHARS};
