//! Semantic oracle client for `LLM` rule conditions.
//!
//! This crate provides:
//! - A chat-completion provider seam with an OpenRouter-compatible backend
//! - [`SemanticOracle`]: boolean natural-language questions over a provider

pub mod oracle;
pub mod provider;
pub mod providers;

pub use oracle::{BooleanOracle, SemanticOracle};
pub use provider::{ChatProvider, LlmError, Message, Role};
pub use providers::create_provider;
