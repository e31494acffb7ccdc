//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, SessionError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        // Validation notices and generation failures are already user-facing.
        ApiError::Session(SessionError::Validation(notice)) => notice.to_string(),
        ApiError::GenerationFailed(message) => message.clone(),
        ApiError::UnknownTool(id) => {
            format!("Unknown tool: {} (run `draftdesk tools` to list tools)", id)
        }
        other => other.to_string(),
    }
}
