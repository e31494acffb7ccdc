//! Typed parser for the generation endpoint's response envelope.
//!
//! Expected shape: `candidates[0].content.parts[0].text`. Any deviation is an
//! [`EnvelopeError`]; callers never index into untyped JSON themselves.

use crate::error::EnvelopeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the answer text from a raw response body.
pub fn extract_text(body: &str) -> Result<String, EnvelopeError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| EnvelopeError::InvalidJson(e.to_string()))?;

    let candidate = envelope
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or(EnvelopeError::NoCandidates)?;
    let content = candidate.content.ok_or(EnvelopeError::NoContent)?;
    let part = content
        .parts
        .and_then(|p| p.into_iter().next())
        .ok_or(EnvelopeError::NoParts)?;
    let text = part.text.ok_or(EnvelopeError::NoText)?;

    if text.trim().is_empty() {
        return Err(EnvelopeError::EmptyText);
    }
    Ok(text)
}

/// Build a well-formed envelope body around `text`.
pub fn wrap_text(text: &str) -> String {
    let envelope = Envelope {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                parts: Some(vec![Part {
                    text: Some(text.to_string()),
                }]),
            }),
        }]),
    };
    serde_json::to_string(&envelope).unwrap_or_default()
}
