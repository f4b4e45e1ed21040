//! Decode errors for backend-produced JSON.
//!
//! The generative backend returns structured output as text. Turning that
//! text into a typed domain value can fail two ways: the text is not the
//! JSON shape we asked for, or it is well-formed JSON that violates a
//! domain invariant.

use thiserror::Error;

/// Failure to turn backend text into a typed domain value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text was not valid JSON for the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON was well-formed but violated a domain invariant.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DecodeError {
    /// Create a new invariant violation error.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}
