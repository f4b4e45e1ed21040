//! Gemini v1beta wire types.
//!
//! Request and response shapes for the `generateContent` family of
//! endpoints. Only the fields the six gateway operations need are
//! modeled: text and inline-data parts, an optional system instruction,
//! and the generation config carrying the structured-output and modality
//! selectors.

use serde::{Deserialize, Serialize};

use aibook_core::InlineData;

/// One request/response payload fragment: text or inline binary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline-data part (uploaded file or image).
    pub fn inline(data: InlineData) -> Self {
        Self {
            text: None,
            inline_data: Some(data),
        }
    }
}

/// An ordered list of parts attributed to a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn with arbitrary parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    /// A single-text user turn.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::text(text)])
    }

    /// A single-text model turn, used when replaying chat history.
    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// A role-less content block, used for the system instruction.
    pub fn bare_text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// Generation knobs: response MIME type, structured-output schema, and
/// response modalities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

impl GenerationConfig {
    /// Ask for a JSON response without constraining its shape.
    pub fn json() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            ..Self::default()
        }
    }

    /// Ask for a JSON response conforming to `schema`.
    pub fn json_with_schema(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Self::default()
        }
    }

    /// Ask for an image response.
    pub fn image() -> Self {
        Self {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            ..Self::default()
        }
    }
}

/// Request body for `generateContent` / `streamGenerateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A request with the given conversation contents.
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    /// A single-turn request with the given parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self::new(vec![Content::user(parts)])
    }

    /// A single-turn text-only request.
    pub fn from_text(prompt: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(prompt)])
    }

    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::bare_text(text));
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One response candidate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Response body for `generateContent`; each SSE frame of
/// `streamGenerateContent` carries one of these as well.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate. Empty when the
    /// response carries no text.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// First inline-data part of the first candidate, if any.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_keys_are_camel_case() {
        let request = GenerateContentRequest::from_text("مرحبا")
            .with_system_instruction("كن ودوداً")
            .with_generation_config(GenerationConfig::json_with_schema(json!({"type": "OBJECT"})));

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_some());
        let config = value.get("generationConfig").unwrap();
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "مرحبا");
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let request = GenerateContentRequest::from_text("سؤال");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_none());
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_image_config_selects_image_modality() {
        let value = serde_json::to_value(GenerationConfig::image()).unwrap();
        assert_eq!(value["responseModalities"][0], "IMAGE");
        assert!(value.get("responseMimeType").is_none());
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "أه"}, {"text": "لاً"}]
                }
            }]
        }))
        .unwrap();

        assert_eq!(response.text(), "أهلاً");
    }

    #[test]
    fn test_response_text_empty_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn test_first_inline_data_skips_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "صورة مرفقة"},
                        {"inlineData": {"mimeType": "image/png", "data": "aW1n"}}
                    ]
                }
            }]
        }))
        .unwrap();

        let data = response.first_inline_data().unwrap();
        assert_eq!(data.mime_type, "image/png");
        assert_eq!(data.data, "aW1n");
    }
}
