use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{ChatProvider, LlmError, Message, Role};

/// OpenRouter-compatible chat-completions backend.
///
/// Any service exposing the `/v1/chat/completions` shape works through
/// `ORACLE_BASE_URL`; only the default points at OpenRouter.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenRouterProvider {
    pub fn new(api_key: String, model: String, base_url: String, timeout: Duration) -> Self {
        // The per-request deadline lives on the client: a timed-out oracle
        // call surfaces as a transport error, which callers treat as a
        // failed (false) answer.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let api_messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::System => "system",
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    "content": [{ "type": "text", "text": m.content }],
                })
            })
            .collect();

        let body = json!({
            "model": self.model,
            "messages": api_messages,
        });

        debug!("oracle request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        first_answer_text(&resp)
            .ok_or_else(|| LlmError::Parse("missing choices[0].message text".into()))
    }
}

/// Extract the first choice's answer text.
///
/// Reads `message.text`, falling back to the `message.content` equivalents
/// (plain string, or an array of typed parts).
fn first_answer_text(resp: &serde_json::Value) -> Option<String> {
    let message = resp.get("choices")?.get(0)?.get("message")?;

    if let Some(text) = message.get("text").and_then(|t| t.as_str()) {
        return Some(text.to_string());
    }

    match message.get("content") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(parts)) => parts
            .iter()
            .find_map(|p| p.get("text").and_then(|t| t.as_str()))
            .map(|s| s.to_string()),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────
