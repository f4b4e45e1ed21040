//! Gateway error types.
//!
//! Three failure classes cross the gateway boundary: transport/auth
//! failures propagate as-is, structure violations in backend text become
//! [`AiError::Parse`] with a fixed Arabic retry message, and well-formed
//! responses missing their payload become [`AiError::Content`]. Detail is
//! logged at the failure site; the user only ever sees the fixed strings.

use thiserror::Error;

/// User-facing Arabic messages.
pub mod messages {
    /// Shown when exam JSON cannot be decoded.
    pub const EXAM_PARSE_FAILED: &str =
        "فشل الذكاء الاصطناعي في إنشاء تنسيق امتحان صالح. يرجى المحاولة مرة أخرى.";

    /// Shown when correction JSON cannot be decoded.
    pub const CORRECTION_PARSE_FAILED: &str =
        "فشل الذكاء الاصطناعي في تقديم تقييم صالح. يرجى المحاولة مرة أخرى.";

    /// Shown when the image response carries no inline image part.
    pub const IMAGE_MISSING: &str = "فشل إنشاء الصورة.";

    /// Generic failure shown for transport errors.
    pub const GENERIC_FAILURE: &str = "حدث خطأ. يرجى المحاولة مرة أخرى.";

    /// Replaces a partial chat reply after a mid-stream failure.
    pub const CHAT_APOLOGY: &str = "عذراً، لقد واجهت خطأ.";
}

/// Gateway errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Transport failure talking to the backend.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend rejected the request with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    /// No API key in the process environment.
    #[error("missing API key (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// Backend text violated the expected structure.
    #[error("failed to decode {context}: {detail}")]
    Parse {
        context: &'static str,
        detail: String,
        user_message: &'static str,
    },

    /// Well-formed response missing the expected payload.
    #[error("{0}")]
    Content(&'static str),

    /// The streaming connection broke mid-response.
    #[error("stream error: {0}")]
    Stream(String),
}

impl AiError {
    /// Error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::Network(_) => "NETWORK_ERROR",
            AiError::Backend { .. } => "BACKEND_ERROR",
            AiError::MissingApiKey => "MISSING_API_KEY",
            AiError::Parse { .. } => "PARSE_ERROR",
            AiError::Content(_) => "CONTENT_ERROR",
            AiError::Stream(_) => "STREAM_ERROR",
        }
    }

    /// Fixed Arabic string suitable for direct display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AiError::Parse { user_message, .. } => user_message,
            AiError::Content(message) => message,
            _ => messages::GENERIC_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_fixed_user_message() {
        let err = AiError::Parse {
            context: "exam",
            detail: "expected value at line 1".to_string(),
            user_message: messages::EXAM_PARSE_FAILED,
        };
        assert_eq!(err.code(), "PARSE_ERROR");
        assert_eq!(err.user_message(), messages::EXAM_PARSE_FAILED);
    }

    #[test]
    fn test_content_error_displays_its_message() {
        let err = AiError::Content(messages::IMAGE_MISSING);
        assert_eq!(err.to_string(), "فشل إنشاء الصورة.");
        assert_eq!(err.user_message(), "فشل إنشاء الصورة.");
    }

    #[test]
    fn test_transport_errors_fall_back_to_generic_message() {
        let err = AiError::Backend {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.user_message(), messages::GENERIC_FAILURE);
    }
}
