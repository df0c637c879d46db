//! Error types for the Extractor

use snap_domain::ValidationError;
use snap_llm::LlmError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while turning a receipt image into a draft
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Service is not configured to make model calls
    #[error("{0}")]
    Configuration(String),

    /// Input rejected before any external call
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Model call failed or timed out
    #[error("{0}")]
    ExternalCall(String),

    /// Model reply could not be interpreted
    #[error("Failed to parse AI response")]
    Parse(ParseFailure),
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential(_) => ExtractorError::Configuration(e.to_string()),
            other => ExtractorError::ExternalCall(other.to_string()),
        }
    }
}

impl From<ParseFailure> for ExtractorError {
    fn from(failure: ParseFailure) -> Self {
        ExtractorError::Parse(failure)
    }
}

/// A model reply that could not be turned into a valid draft.
///
/// Keeps the original text so it can be logged; it is not shown to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Short description of what went wrong
    pub reason: String,
    /// Reply exactly as received
    pub raw_text: String,
}

impl ParseFailure {
    /// Reply did not decode as the expected JSON object
    pub const MALFORMED: &'static str = "malformed response";

    /// Reply decoded but a field broke a domain rule
    pub const INVALID_FIELD: &'static str = "invalid field";

    pub(crate) fn new(reason: impl Into<String>, raw_text: &str) -> Self {
        Self {
            reason: reason.into(),
            raw_text: raw_text.to_string(),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ParseFailure {}
