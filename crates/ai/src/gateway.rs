//! The six gateway operations against the generative backend.
//!
//! Each operation performs exactly one outbound call and normalizes the
//! result into the domain model. Parse and missing-payload failures are
//! converted to domain errors carrying a fixed Arabic message; transport
//! failures propagate unmodified.

use std::sync::Arc;

use futures::StreamExt;
use log::error;

use aibook_core::{
    CorrectionResult, Difficulty, Exam, ExamType, ExplanationStyle, SourceContent, UserAnswers,
};

use crate::client::{GenerativeClient, MODEL_FLASH, MODEL_FLASH_IMAGE, MODEL_PRO};
use crate::error::{messages, AiError};
use crate::prompt;
use crate::session::ChatSessionManager;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

/// Gateway over one backend client, plus the chat session it owns.
pub struct AiGateway<C: GenerativeClient> {
    client: Arc<C>,
    chat: ChatSessionManager<C>,
}

impl<C: GenerativeClient + 'static> AiGateway<C> {
    pub fn new(client: Arc<C>) -> Self {
        let chat = ChatSessionManager::new(client.clone());
        Self { client, chat }
    }

    /// Generate an exam from `source` with the structured-output schema
    /// attached.
    pub async fn generate_exam(
        &self,
        difficulty: Difficulty,
        exam_type: ExamType,
        source: &SourceContent,
    ) -> Result<Exam, AiError> {
        let request = source_request(prompt::exam_prompt(difficulty, exam_type, source), source)
            .with_generation_config(GenerationConfig::json_with_schema(
                prompt::exam_response_schema(),
            ));

        let response = self.client.generate(MODEL_PRO, request).await?;
        parse_exam_response(&response)
    }

    /// Grade a submission. The prompt describes the expected JSON shape
    /// in prose; no schema object is attached on this path.
    pub async fn correct_exam(
        &self,
        exam: &Exam,
        user_answers: &UserAnswers,
    ) -> Result<CorrectionResult, AiError> {
        let request = GenerateContentRequest::from_text(prompt::correction_prompt(exam, user_answers))
            .with_generation_config(GenerationConfig::json());

        let response = self.client.generate(MODEL_FLASH, request).await?;
        parse_correction_response(&response)
    }

    /// Explain `source` in the requested style. The backend's markdown
    /// comes back unmodified.
    pub async fn explain_topic(
        &self,
        style: ExplanationStyle,
        source: &SourceContent,
    ) -> Result<String, AiError> {
        let request = source_request(prompt::explanation_prompt(style, source), source);
        let response = self.client.generate(MODEL_FLASH, request).await?;
        Ok(response.text())
    }

    /// Author a structured markdown project document.
    pub async fn create_project(&self, topic: &str, details: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest::from_text(prompt::project_prompt(topic, details));
        let response = self.client.generate(MODEL_PRO, request).await?;
        Ok(response.text())
    }

    /// Generate an illustrative image, returned as a data URI.
    pub async fn generate_project_image(&self, topic: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest::from_text(prompt::image_prompt(topic))
            .with_generation_config(GenerationConfig::image());

        let response = self.client.generate(MODEL_FLASH_IMAGE, request).await?;
        extract_image_data_uri(&response)
    }

    /// The chat session manager owned by this gateway.
    pub fn chat(&self) -> &ChatSessionManager<C> {
        &self.chat
    }

    /// Callback adapter over the chat stream: `on_chunk` is invoked once
    /// per fragment in delivery order until the stream completes.
    /// Accumulation is the caller's responsibility.
    pub async fn stream_chat_response<F>(&self, message: &str, mut on_chunk: F) -> Result<(), AiError>
    where
        F: FnMut(&str),
    {
        let mut stream = self.chat.send_message_stream(message).await?;
        while let Some(chunk) = stream.next().await {
            on_chunk(&chunk?);
        }
        Ok(())
    }
}

/// Build a single-turn request from a prompt and its source: inline data
/// first, instruction text after, matching the upload-then-prompt part
/// order the backend expects.
fn source_request(prompt_text: String, source: &SourceContent) -> GenerateContentRequest {
    let mut parts = Vec::new();
    if let SourceContent::Inline(data) = source {
        parts.push(Part::inline(data.clone()));
    }
    parts.push(Part::text(prompt_text));
    GenerateContentRequest::from_parts(parts)
}

fn parse_exam_response(response: &GenerateContentResponse) -> Result<Exam, AiError> {
    let text = response.text();
    Exam::from_backend_json(&text).map_err(|e| {
        error!("failed to decode exam JSON: {}", e);
        AiError::Parse {
            context: "exam",
            detail: e.to_string(),
            user_message: messages::EXAM_PARSE_FAILED,
        }
    })
}

fn parse_correction_response(
    response: &GenerateContentResponse,
) -> Result<CorrectionResult, AiError> {
    let text = response.text();
    CorrectionResult::from_backend_json(&text).map_err(|e| {
        error!("failed to decode correction JSON: {}", e);
        AiError::Parse {
            context: "correction",
            detail: e.to_string(),
            user_message: messages::CORRECTION_PARSE_FAILED,
        }
    })
}

fn extract_image_data_uri(response: &GenerateContentResponse) -> Result<String, AiError> {
    let part = response
        .first_inline_data()
        .ok_or(AiError::Content(messages::IMAGE_MISSING))?;
    Ok(format!("data:{};base64,{}", part.mime_type, part.data))
}
