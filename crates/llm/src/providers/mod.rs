pub mod openrouter;

use std::time::Duration;

use firmo_core::config::OracleConfig;

use crate::provider::{ChatProvider, LlmError};

/// Create the chat provider backing the oracle from config.
pub fn create_provider(config: &OracleConfig) -> Result<Box<dyn ChatProvider>, LlmError> {
    let api_key = config
        .api_key
        .as_ref()
        .ok_or_else(|| LlmError::NotConfigured("OPENROUTER_API_KEY not set".into()))?;

    Ok(Box::new(openrouter::OpenRouterProvider::new(
        api_key.clone(),
        config.model.clone(),
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )))
}
