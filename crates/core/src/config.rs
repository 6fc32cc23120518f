use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub oracle: OracleConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            oracle: OracleConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:  {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  oracle:  model={}, base_url={}, configured={}",
            self.oracle.model,
            self.oracle.base_url,
            self.oracle.is_configured()
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── Semantic oracle (OpenRouter-compatible chat API) ──────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Per-call deadline; a timed-out oracle call counts as a failed one.
    pub timeout_secs: u64,
}

impl OracleConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_opt("OPENROUTER_API_KEY"),
            model: env_or(
                "ORACLE_MODEL",
                "mistralai/mistral-small-3.2-24b-instruct:free",
            ),
            base_url: env_or("ORACLE_BASE_URL", "https://openrouter.ai/api"),
            timeout_secs: env_u64("ORACLE_TIMEOUT_SECS", 30),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
