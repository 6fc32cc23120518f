//! Boolean semantic oracle over a chat provider.
//!
//! Turns "does this text satisfy this question?" into a single-turn chat
//! request with a fixed prompt, and reads the answer conservatively: only
//! a literal `"true"` (whitespace-trimmed, case-insensitive) counts as a
//! match. An ambiguous or malformed answer is a "no", never a match.

use async_trait::async_trait;
use tracing::debug;

use crate::provider::{ChatProvider, LlmError, Message, Role};

/// The seam the rule engine holds. Tests script answers through it.
#[async_trait]
pub trait BooleanOracle: Send + Sync {
    /// Ask whether `context` satisfies `question`.
    ///
    /// `Ok(false)` covers both an explicit "false" and any answer that
    /// cannot be read as "true". `Err` is reserved for transport-level
    /// failures; callers decide how to treat those.
    async fn ask(&self, question: &str, context: &str) -> Result<bool, LlmError>;
}

/// [`BooleanOracle`] backed by a chat-completion provider.
pub struct SemanticOracle {
    provider: Box<dyn ChatProvider>,
}

impl SemanticOracle {
    pub fn new(provider: Box<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    fn prompt(question: &str, context: &str) -> String {
        format!(
            "Context:\n{context}\n\nQuestion: {question}\nAnswer with \"true\" or \"false\" only.\n"
        )
    }
}

#[async_trait]
impl BooleanOracle for SemanticOracle {
    async fn ask(&self, question: &str, context: &str) -> Result<bool, LlmError> {
        let messages = vec![Message {
            role: Role::User,
            content: Self::prompt(question, context),
        }];

        match self.provider.complete(messages).await {
            Ok(answer) => Ok(answer.trim().to_lowercase() == "true"),
            // An unreadable or absent answer is a "no", not an error.
            Err(LlmError::Parse(detail)) => {
                debug!("oracle answer unreadable: {}", detail);
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
