//! Per-feature view-state orchestrators.
//!
//! Each orchestrator holds the current input's results, a loading flag,
//! and an error slot. On submit it invokes the matching gateway
//! operation; on success it stores the result, on failure the fixed
//! Arabic user message. The hosting shell reads these structs to render.

mod chat_widget;
mod exam;
mod lesson;
mod project;

pub use chat_widget::{ChatWidget, WELCOME_MESSAGE};
pub use exam::ExamOrchestrator;
pub use lesson::LessonOrchestrator;
pub use project::ProjectOrchestrator;
