//! Chat transcript types.
//!
//! The transcript is an ordered message list with one deliberate mutation
//! point: while a reply streams in, the trailing bot placeholder grows in
//! place, one chunk at a time.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One visible chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Create a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    /// Empty bot message appended before streaming begins.
    pub fn bot_placeholder() -> Self {
        Self::bot("")
    }
}

/// Ordered chat transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message at the end.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Extend the trailing bot reply in place with one streamed chunk.
    /// Does nothing when the last message is not a bot message.
    pub fn append_to_reply(&mut self, chunk: &str) {
        if let Some(last) = self.messages.last_mut() {
            if last.sender == Sender::Bot {
                last.text.push_str(chunk);
            }
        }
    }

    /// Replace the trailing bot reply wholesale; a partial reply is never
    /// left on screen after a mid-stream failure.
    pub fn fail_reply(&mut self, message: impl Into<String>) {
        if let Some(last) = self.messages.last_mut() {
            if last.sender == Sender::Bot {
                last.text = message.into();
            }
        }
    }

    /// Text of the trailing message, if any.
    pub fn last_text(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }
}
