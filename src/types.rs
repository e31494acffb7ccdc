//! Core value types shared by the client, the chain generator and the wizard.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message shown when the endpoint cannot be reached or keeps timing out.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Message shown when the endpoint answered but no text could be extracted.
pub const DEFAULT_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate a response. Please try again.";

/// Terminal outcome of a generation. Every request produces exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Ok { text: String },
    Failed { message: String },
}

impl GenerationResult {
    pub fn ok(text: impl Into<String>) -> Self {
        GenerationResult::Ok { text: text.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        GenerationResult::Failed {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, GenerationResult::Ok { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationResult::Ok { text } => Some(text),
            GenerationResult::Failed { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            GenerationResult::Ok { .. } => None,
            GenerationResult::Failed { message } => Some(message),
        }
    }

    /// Text to put in front of the user: the document or the failure message.
    pub fn display_text(&self) -> &str {
        match self {
            GenerationResult::Ok { text } => text,
            GenerationResult::Failed { message } => message,
        }
    }
}

/// One instruction for the generation endpoint. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    instruction: String,
    max_retries: Option<u32>,
    timeout: Option<Duration>,
    failure_message: Option<String>,
}

impl GenerationRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            max_retries: None,
            timeout: None,
            failure_message: None,
        }
    }

    /// Override the client's retry budget for this request.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Override the client's per-attempt timeout for this request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Tool-specific message used when the endpoint returns no usable text.
    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn failure_message(&self) -> &str {
        self.failure_message
            .as_deref()
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }
}
