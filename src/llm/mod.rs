//! Completion gateway.
//!
//! `LlmProvider` is an enum over concrete backends; `CompletionGateway` wraps
//! the configured one. The fallible path is [`CompletionGateway::complete`],
//! which returns a [`CompletionFailure`] the caller must handle.
//! [`CompletionGateway::generate`] is the total version used by the chat
//! endpoint: every failure becomes its fixed apology string.

pub mod providers;

use thiserror::Error;
use tracing::{error, warn};

use crate::config::LlmConfig;

pub const APOLOGY_NOT_CONFIGURED: &str =
    "I'm sorry, the AI service is not properly configured. Please provide the API keys.";
pub const APOLOGY_PROCESSING: &str =
    "I'm sorry, I'm having trouble processing your request right now.";
pub const APOLOGY_CONNECTING: &str =
    "I'm sorry, I'm having trouble connecting to the AI service.";

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failure to construct a backend at startup.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Why a single completion call produced no text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailure {
    /// API key or API base missing; no request was sent.
    #[error("completion API key or base URL is not configured")]
    NotConfigured,
    /// The provider answered with a non-200 status.
    #[error("provider returned HTTP {0}")]
    UpstreamStatus(u16),
    /// Connection refused, DNS failure, timeout, body read error.
    #[error("provider request failed: {0}")]
    Transport(String),
    /// 200 response whose body is not a usable completion.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl CompletionFailure {
    /// Fixed user-facing text substituted for the completion.
    pub fn apology(&self) -> &'static str {
        match self {
            CompletionFailure::NotConfigured => APOLOGY_NOT_CONFIGURED,
            CompletionFailure::UpstreamStatus(_) => APOLOGY_PROCESSING,
            CompletionFailure::Transport(_) | CompletionFailure::MalformedResponse(_) => {
                APOLOGY_CONNECTING
            }
        }
    }
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// Available backends. Enum dispatch keeps `complete` a plain `async fn`.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionFailure> {
        match self {
            LlmProvider::OpenAiCompatible(p) => p.complete(system, user).await,
            LlmProvider::Dummy(p) => p.complete(system, user).await,
        }
    }

    /// `false` when a call would short-circuit with [`CompletionFailure::NotConfigured`].
    pub fn is_configured(&self) -> bool {
        match self {
            LlmProvider::OpenAiCompatible(p) => p.is_configured(),
            LlmProvider::Dummy(_) => true,
        }
    }
}

// ── Gateway ───────────────────────────────────────────────────────────────────

/// Shared, immutable handle to the configured backend. Clone freely.
#[derive(Debug, Clone)]
pub struct CompletionGateway {
    provider: LlmProvider,
}

impl CompletionGateway {
    /// Build the gateway from config. `api_key` comes from the environment only.
    pub fn new(config: &LlmConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        Ok(Self { provider: providers::build(config, api_key)? })
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// One round-trip to the provider.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionFailure> {
        self.provider.complete(system, user).await
    }

    /// Like [`complete`](Self::complete), but never fails: a failure is logged
    /// and replaced by its apology string.
    pub async fn generate(&self, system: &str, user: &str) -> String {
        match self.complete(system, user).await {
            Ok(text) => text,
            Err(failure) => {
                match &failure {
                    CompletionFailure::NotConfigured => {
                        warn!("completion skipped: OPENAI_API_KEY or OPENAI_API_BASE not set")
                    }
                    other => error!(error = %other, "completion failed"),
                }
                failure.apology().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apology_per_failure_kind() {
        assert_eq!(CompletionFailure::NotConfigured.apology(), APOLOGY_NOT_CONFIGURED);
        assert_eq!(CompletionFailure::UpstreamStatus(503).apology(), APOLOGY_PROCESSING);
        assert_eq!(CompletionFailure::UpstreamStatus(401).apology(), APOLOGY_PROCESSING);
        assert_eq!(
            CompletionFailure::Transport("operation timed out".into()).apology(),
            APOLOGY_CONNECTING
        );
        assert_eq!(
            CompletionFailure::MalformedResponse("no choices".into()).apology(),
            APOLOGY_CONNECTING
        );
    }

    #[tokio::test]
    async fn unconfigured_gateway_returns_configuration_apology() {
        let gateway = CompletionGateway::new(&LlmConfig::default(), None).unwrap();
        assert!(!gateway.is_configured());
        assert_eq!(gateway.complete("sys", "hi").await, Err(CompletionFailure::NotConfigured));
        assert_eq!(gateway.generate("sys", "hi").await, APOLOGY_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn dummy_gateway_is_always_configured() {
        let config = LlmConfig { provider: "dummy".into(), ..LlmConfig::default() };
        let gateway = CompletionGateway::new(&config, None).unwrap();
        assert!(gateway.is_configured());
        assert_eq!(gateway.generate("sys", "hello").await, "[echo] hello");
    }
}
