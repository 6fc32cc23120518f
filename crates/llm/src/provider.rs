use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat message for the oracle's backing model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Trait for chat-completion backends. The oracle asks one single-turn
/// question per call, so model and sampling parameters live in the
/// provider, not the call site.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat request and return the first answer's text.
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}
