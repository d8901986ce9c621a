//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape: serde target before resolution.
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub log: RawLog,
    #[serde(default)]
    pub llm: RawLlm,
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            service_name: default_service_name(),
            cors: true,
        }
    }
}

// ── Log ──────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLog {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for RawLog {
    fn default() -> Self {
        Self { level: default_log_level(), file: None }
    }
}

// ── LLM ──────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLlm {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_base: None,
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

pub(super) fn default_service_name() -> String {
    "BCA Expert Chat API".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_llm_provider() -> String {
    "openai".to_string()
}

pub(super) fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub(super) fn default_max_tokens() -> u32 {
    500
}

pub(super) fn default_temperature() -> f32 {
    0.3
}

pub(super) fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
