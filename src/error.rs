//! Error types for the draftdesk generation layer.
//!
//! Transport and envelope errors never leave the request client: the client
//! folds them into a [`GenerationResult`](crate::types::GenerationResult).
//! Session errors are local and recoverable.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single call to the generation endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(#[from] EnvelopeError),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Only timeouts are retried; every other category is deterministic enough
    /// that a retry would just repeat the failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// Response body parsed but did not contain answer text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response has no candidates")]
    NoCandidates,

    #[error("first candidate has no content")]
    NoContent,

    #[error("candidate content has no parts")]
    NoParts,

    #[error("first part has no text")]
    NoText,

    #[error("first part text is empty")]
    EmptyText,
}

/// Missing required input on the current (or a prior) wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationNotice {
    pub step_index: usize,
    pub step_title: String,
    /// Labels of the fields that are required but empty.
    pub missing: Vec<String>,
}

impl std::fmt::Display for ValidationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Step {} ({}) is incomplete: please fill in {}",
            self.step_index + 1,
            self.step_title,
            self.missing.join(", ")
        )
    }
}

/// Rejected wizard operation. The session is unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0}")]
    Validation(ValidationNotice),

    #[error("Cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' expects {expected}")]
    WrongValueKind {
        field: String,
        expected: &'static str,
    },

    #[error("Value '{value}' is not an option for '{field}'")]
    InvalidChoice { field: String, value: String },

    #[error("Step {index} is out of range (tool has {count} steps)")]
    StepOutOfRange { index: usize, count: usize },

    #[error("Step {index} does not apply to the current answers")]
    StepHidden { index: usize },
}

/// Crate-level errors for configuration, export and CLI plumbing.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// Generation ended in a failure result; carries the user-facing message.
    #[error("{0}")]
    GenerationFailed(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
