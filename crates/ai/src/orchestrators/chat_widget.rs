//! Floating chat widget state.
//!
//! On send, an empty bot placeholder is appended before streaming begins
//! and each chunk extends that same message in place. A mid-stream
//! failure replaces the placeholder with a fixed apology, never leaving
//! a partial reply. Closing the widget drops the in-flight send future,
//! which cancels the stream; late chunks are never applied.

use std::sync::Arc;

use futures::StreamExt;
use log::error;

use aibook_core::{ChatMessage, Transcript};

use crate::client::GenerativeClient;
use crate::error::messages;
use crate::gateway::AiGateway;

/// Greeting seeded into the transcript on first open.
pub const WELCOME_MESSAGE: &str = "أهلاً بك في AI Book! أنا مساعدك الذكي.\n\
يمكنني مساعدتك في:\n\
- **مولد الاختبارات:** أنشئ امتحانات من أي نص أو ملف.\n\
- **شرح الدروس:** بسّط المواضيع المعقدة بأساليب مختلفة.\n\
- **منشئ المشاريع:** جهّز مشاريع متكاملة مع صور.\n\
كيف يمكنني خدمتك اليوم؟";

/// State for the floating chat widget.
pub struct ChatWidget<C: GenerativeClient + 'static> {
    gateway: Arc<AiGateway<C>>,
    open: bool,
    initialized: bool,
    loading: bool,
    transcript: Transcript,
}

impl<C: GenerativeClient + 'static> ChatWidget<C> {
    pub fn new(gateway: Arc<AiGateway<C>>) -> Self {
        Self {
            gateway,
            open: false,
            initialized: false,
            loading: false,
            transcript: Transcript::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Open the widget; the welcome message is seeded exactly once.
    pub fn open(&mut self) {
        self.open = true;
        if !self.initialized {
            self.transcript.push(ChatMessage::bot(WELCOME_MESSAGE));
            self.initialized = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Send one message and stream the reply into the transcript.
    ///
    /// Empty input and sends while a reply is already streaming are
    /// ignored.
    pub async fn send(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() || self.loading {
            return;
        }

        self.transcript.push(ChatMessage::user(input));
        self.transcript.push(ChatMessage::bot_placeholder());
        self.loading = true;

        let outcome = async {
            let mut stream = self.gateway.chat().send_message_stream(input).await?;
            while let Some(chunk) = stream.next().await {
                self.transcript.append_to_reply(&chunk?);
            }
            Ok::<(), crate::error::AiError>(())
        }
        .await;

        if let Err(e) = outcome {
            error!("chat stream failed: {}", e);
            self.transcript.fail_reply(messages::CHAT_APOLOGY);
        }
        self.loading = false;
    }
}
