//! Source content handed to the generative backend.
//!
//! Uploaded files arrive from the file-input collaborator as base64 plus a
//! MIME type; the gateway treats that as an opaque inline-data part.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// A base64-encoded binary payload with its MIME type. Used both for
/// uploads going out and generated images coming back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded payload.
    pub data: String,
}

impl InlineData {
    /// Wrap an already-encoded payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes, e.g. a user-selected file.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

/// What exam generation and lesson explanation work from: pasted text or
/// an uploaded file/image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Text(String),
    Inline(InlineData),
}

impl SourceContent {
    /// Text source.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The pasted text, when this is a text source.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SourceContent::Text(text) => Some(text),
            SourceContent::Inline(_) => None,
        }
    }
}

impl From<InlineData> for SourceContent {
    fn from(data: InlineData) -> Self {
        Self::Inline(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_encodes_base64() {
        let data = InlineData::from_bytes("text/plain", "ماء".as_bytes());
        assert_eq!(data.mime_type, "text/plain");
        assert_eq!(data.data, STANDARD.encode("ماء".as_bytes()));
    }

    #[test]
    fn test_inline_data_wire_keys_are_camel_case() {
        let data = InlineData::new("image/png", "aGVsbG8=");
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("mimeType").is_some());
        assert!(json.get("data").is_some());
    }
}
