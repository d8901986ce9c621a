//! Resolved configuration types consumed by the server and the gateway.

use std::path::PathBuf;

use super::raw;

/// HTTP listener settings (`[server]`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the listener binds to.
    pub bind: String,
    /// Name reported by `GET /health`.
    pub service_name: String,
    /// Attach a permissive CORS layer to every route.
    pub cors: bool,
}

/// Logging settings (`[log]`).
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    /// Append log output to this file instead of stderr (already `~`-expanded).
    pub file: Option<PathBuf>,
}

/// Completion backend settings (`[llm]`).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which backend is active: `"openai"` or `"dummy"`.
    pub provider: String,
    /// Base URL of the chat-completions API; `/chat/completions` is appended.
    /// `None` leaves the gateway unconfigured.
    pub api_base: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: raw::default_llm_provider(),
            api_base: None,
            model: raw::default_llm_model(),
            max_tokens: raw::default_max_tokens(),
            temperature: raw::default_temperature(),
            timeout_seconds: raw::default_timeout_seconds(),
        }
    }
}

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub llm: LlmConfig,
    /// API key from `OPENAI_API_KEY`. Never sourced from TOML.
    pub llm_api_key: Option<String>,
}

/// Values read from the process environment that take precedence over TOML.
///
/// Kept as a plain struct so tests can pass overrides without mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            api_base: std::env::var("OPENAI_API_BASE").ok(),
            bind: std::env::var("BCA_EXPERT_BIND").ok(),
            log_level: std::env::var("BCA_EXPERT_LOG_LEVEL").ok(),
        }
    }
}
