//! Project creation state.

use std::sync::Arc;

use log::{error, warn};

use crate::client::GenerativeClient;
use crate::gateway::AiGateway;

/// State for the project creator: the markdown document plus an optional
/// illustration data URI.
pub struct ProjectOrchestrator<C: GenerativeClient + 'static> {
    gateway: Arc<AiGateway<C>>,
    loading: bool,
    document: Option<String>,
    image_data_uri: Option<String>,
    error: Option<String>,
}

impl<C: GenerativeClient + 'static> ProjectOrchestrator<C> {
    pub fn new(gateway: Arc<AiGateway<C>>) -> Self {
        Self {
            gateway,
            loading: false,
            document: None,
            image_data_uri: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn image_data_uri(&self) -> Option<&str> {
        self.image_data_uri.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Author the project document, then its illustration. The image is
    /// best-effort: a failed image keeps the generated document.
    pub async fn create(&mut self, topic: &str, details: &str) {
        self.loading = true;
        self.error = None;
        self.document = None;
        self.image_data_uri = None;

        match self.gateway.create_project(topic, details).await {
            Ok(text) => {
                self.document = Some(text);
                match self.gateway.generate_project_image(topic).await {
                    Ok(uri) => self.image_data_uri = Some(uri),
                    Err(e) => {
                        warn!("project illustration failed: {}", e);
                        self.error = Some(e.user_message().to_string());
                    }
                }
            }
            Err(e) => {
                error!("project creation failed: {}", e);
                self.error = Some(e.user_message().to_string());
            }
        }
        self.loading = false;
    }
}
