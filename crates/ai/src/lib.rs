//! AI Book AI - Gemini orchestration for the Arabic educational assistant.
//!
//! This crate is the request/response layer between the feature
//! orchestrators and the generative backend:
//!
//! - `prompt`: Arabic instruction builders and the exam output schema
//! - `wire`: Gemini v1beta request/response shapes
//! - `client`: reqwest-backed client and the `GenerativeClient` seam
//! - `gateway`: the six operations with response normalization
//! - `session`: lazily created chat session with backend-carried context
//! - `orchestrators`: per-feature view state (exam, lesson, project, chat)
//! - `error`: failure taxonomy with fixed Arabic user messages
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use aibook_ai::{AiGateway, GeminiClient};
//! use aibook_core::{Difficulty, ExamType, SourceContent};
//!
//! let client = Arc::new(GeminiClient::from_env()?);
//! let gateway = AiGateway::new(client);
//!
//! let exam = gateway
//!     .generate_exam(
//!         Difficulty::Easy,
//!         ExamType::Comprehensive,
//!         &SourceContent::text("نص عن الماء"),
//!     )
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod gateway;
pub mod orchestrators;
pub mod prompt;
pub mod session;
pub mod wire;

// Re-export main types for convenience
pub use client::{
    ChunkStream, GatewayConfig, GeminiClient, GenerativeClient, DEFAULT_BASE_URL, MODEL_FLASH,
    MODEL_FLASH_IMAGE, MODEL_PRO,
};
pub use error::{messages, AiError};
pub use gateway::AiGateway;
pub use orchestrators::{
    ChatWidget, ExamOrchestrator, LessonOrchestrator, ProjectOrchestrator, WELCOME_MESSAGE,
};
pub use session::{ChatSession, ChatSessionManager};
