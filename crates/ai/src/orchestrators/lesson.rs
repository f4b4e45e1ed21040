//! Lesson explanation state.

use std::sync::Arc;

use log::error;

use aibook_core::{ExplanationStyle, SourceContent};

use crate::client::GenerativeClient;
use crate::gateway::AiGateway;

/// State for the lesson explainer: the markdown explanation or an error.
pub struct LessonOrchestrator<C: GenerativeClient + 'static> {
    gateway: Arc<AiGateway<C>>,
    loading: bool,
    explanation: Option<String>,
    error: Option<String>,
}

impl<C: GenerativeClient + 'static> LessonOrchestrator<C> {
    pub fn new(gateway: Arc<AiGateway<C>>) -> Self {
        Self {
            gateway,
            loading: false,
            explanation: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Request an explanation of `source` in the given style.
    pub async fn explain(&mut self, style: ExplanationStyle, source: SourceContent) {
        self.loading = true;
        self.error = None;
        self.explanation = None;

        match self.gateway.explain_topic(style, &source).await {
            Ok(text) => self.explanation = Some(text),
            Err(e) => {
                error!("lesson explanation failed: {}", e);
                self.error = Some(e.user_message().to_string());
            }
        }
        self.loading = false;
    }
}
