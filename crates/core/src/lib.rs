//! AI Book Core - domain entities for the Arabic educational assistant.
//!
//! This crate contains the domain model shared by the Gemini gateway and
//! whatever shell (web/Tauri) hosts it: exams and their questions,
//! correction results, chat transcripts, and uploaded source content.
//! It performs no I/O; backend-produced JSON enters through the validated
//! `from_backend_json` constructors rather than a raw cast.

pub mod chat;
pub mod content;
pub mod correction;
pub mod errors;
pub mod exam;

// Re-export common types
pub use chat::{ChatMessage, Sender, Transcript};
pub use content::{InlineData, SourceContent};
pub use correction::{CorrectionResult, QuestionFeedback};
pub use errors::DecodeError;
pub use exam::{
    Answer, Difficulty, Exam, ExamType, ExplanationStyle, Question, QuestionType, UserAnswers,
};
