//! Gemini HTTP client.
//!
//! One `POST …:generateContent` per request/response operation and one
//! `POST …:streamGenerateContent?alt=sse` per chat turn. Each SSE `data:`
//! frame carries a complete [`GenerateContentResponse`]; its text is one
//! chunk. Frames are forwarded through an mpsc channel so the consumer
//! sees a plain pull-based stream; dropping that stream tears the
//! connection down.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use log::{debug, error, warn};
use reqwest::Client;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AiError;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Hosted Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model for exam generation and project authoring.
pub const MODEL_PRO: &str = "gemini-2.5-pro";
/// Model for correction, explanation, and chat.
pub const MODEL_FLASH: &str = "gemini-2.5-flash";
/// Model for image generation.
pub const MODEL_FLASH_IMAGE: &str = "gemini-2.5-flash-image";

/// Request timeout for non-streaming calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A lazy, finite, non-restartable sequence of text fragments from one
/// streaming response.
pub type ChunkStream = BoxStream<'static, Result<String, AiError>>;

/// Connection settings for the generative backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub base_url: String,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AiError> {
        lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .map(Self::new)
            .ok_or(AiError::MissingApiKey)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// The backend seam. The gateway and the chat session talk to this trait;
/// tests substitute a mock.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// One request/response cycle.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError>;

    /// One streaming cycle; chunks arrive in delivery order.
    async fn stream_generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<ChunkStream, AiError>;
}

/// reqwest-backed Gemini client.
pub struct GeminiClient {
    http: Client,
    config: GatewayConfig,
}

impl GeminiClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Build a client from the process environment.
    pub fn from_env() -> Result<Self, AiError> {
        Ok(Self::new(GatewayConfig::from_env()?))
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.config.base_url, model, method)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let url = self.endpoint(model, "generateContent");
        debug!("generateContent: model={}", model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("backend returned {} for model {}: {}", status, model, body);
            return Err(AiError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    async fn stream_generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<ChunkStream, AiError> {
        let url = format!("{}?alt=sse", self.endpoint(model, "streamGenerateContent"));
        debug!("streamGenerateContent: model={}", model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("backend returned {} for model {}: {}", status, model, body);
            return Err(AiError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = mpsc::channel::<Result<String, AiError>>(32);
        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut lines = SseLineBuffer::new();

            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(bytes) => {
                        for text in lines.push(&bytes) {
                            if tx.send(Ok(text)).await.is_err() {
                                // Receiver dropped: the consumer cancelled.
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(AiError::Stream(e.to_string()))).await;
                        return;
                    }
                }
            }

            if let Some(text) = lines.finish() {
                let _ = tx.send(Ok(text)).await;
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

/// Accumulates raw network reads and yields the text delta of each
/// completed SSE frame.
///
/// Buffering stays on the byte level until a full line is available:
/// a read boundary can fall inside a multibyte UTF-8 sequence, and
/// `b'\n'` never occurs inside one, so splitting at newlines first
/// keeps such sequences intact.
struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed one network read; returns the text deltas of the frames it
    /// completed, in order.
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut deltas = Vec::new();

        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);

            if let Some(text) = parse_sse_line(line.trim()) {
                if !text.is_empty() {
                    deltas.push(text);
                }
            }
        }

        deltas
    }

    /// Trailing frame without a final newline.
    fn finish(self) -> Option<String> {
        let tail = String::from_utf8_lossy(&self.buffer);
        parse_sse_line(tail.trim()).filter(|text| !text.is_empty())
    }
}

/// Extract the text delta from one SSE line.
fn parse_sse_line(line: &str) -> Option<String> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    match serde_json::from_str::<GenerateContentResponse>(payload) {
        Ok(frame) => Some(frame.text()),
        Err(e) => {
            warn!("unparseable SSE frame: {}", e);
            None
        }
    }
}
