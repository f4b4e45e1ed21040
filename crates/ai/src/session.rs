//! Chat session with backend-carried conversational context.
//!
//! [`ChatSessionManager`] is an owned object constructed at application
//! start and injected wherever chat is needed; there is no process-wide
//! static. Inside it the session is created lazily on first use
//! (Uninitialized -> Active, no teardown) and every later call returns
//! the same session.

use std::sync::Arc;

use futures::StreamExt;
use log::debug;
use once_cell::sync::OnceCell;
use tokio::sync::{mpsc, Mutex};
use tokio_stream::wrappers::ReceiverStream;

use crate::client::{ChunkStream, GenerativeClient, MODEL_FLASH};
use crate::error::AiError;
use crate::prompt;
use crate::wire::{Content, GenerateContentRequest};

/// One turn as the backend sees it.
#[derive(Debug, Clone)]
struct Turn {
    role: &'static str,
    text: String,
}

impl Turn {
    fn user(text: String) -> Self {
        Self { role: "user", text }
    }

    fn model(text: String) -> Self {
        Self { role: "model", text }
    }
}

/// An active conversation. History accumulates across turns and is
/// replayed with every request, which is how the backend carries context.
pub struct ChatSession<C: GenerativeClient> {
    client: Arc<C>,
    system_instruction: String,
    history: Arc<Mutex<Vec<Turn>>>,
}

impl<C: GenerativeClient + 'static> ChatSession<C> {
    fn new(client: Arc<C>, system_instruction: String) -> Self {
        Self {
            client,
            system_instruction,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of turns (user + model) committed to history.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Send one user turn and stream the model's reply.
    ///
    /// The reply is committed to history only when the stream ends
    /// cleanly; a cancelled or failed stream leaves history as it was,
    /// so a retry replays the same context.
    pub async fn send_message_stream(&self, message: &str) -> Result<ChunkStream, AiError> {
        let mut contents: Vec<Content> = Vec::new();
        {
            let history = self.history.lock().await;
            for turn in history.iter() {
                contents.push(match turn.role {
                    "model" => Content::model_text(turn.text.clone()),
                    _ => Content::user_text(turn.text.clone()),
                });
            }
        }
        contents.push(Content::user_text(message));

        let request = GenerateContentRequest::new(contents)
            .with_system_instruction(&self.system_instruction);

        let upstream = self.client.stream_generate(MODEL_FLASH, request).await?;

        let (tx, rx) = mpsc::channel::<Result<String, AiError>>(32);
        let history = Arc::clone(&self.history);
        let user_text = message.to_string();

        tokio::spawn(async move {
            let mut upstream = upstream;
            let mut reply = String::new();

            while let Some(item) = upstream.next().await {
                let failed = item.is_err();
                if let Ok(chunk) = &item {
                    reply.push_str(chunk);
                }
                if tx.send(item).await.is_err() || failed {
                    return;
                }
            }

            let mut history = history.lock().await;
            history.push(Turn::user(user_text));
            history.push(Turn::model(reply));
            debug!("chat history now holds {} turns", history.len());
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

/// Owns the lazily created chat session.
pub struct ChatSessionManager<C: GenerativeClient> {
    client: Arc<C>,
    session: OnceCell<Arc<ChatSession<C>>>,
}

impl<C: GenerativeClient + 'static> ChatSessionManager<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            session: OnceCell::new(),
        }
    }

    /// The session. First call creates it; every later call returns the
    /// same one.
    pub fn session(&self) -> Arc<ChatSession<C>> {
        self.session
            .get_or_init(|| {
                Arc::new(ChatSession::new(
                    self.client.clone(),
                    prompt::CHAT_SYSTEM_INSTRUCTION.to_string(),
                ))
            })
            .clone()
    }

    /// Send one user turn through the session.
    pub async fn send_message_stream(&self, message: &str) -> Result<ChunkStream, AiError> {
        self.session().send_message_stream(message).await
    }
}
