//! Chat-completions backend (`POST {api_base}/chat/completions`).
//!
//! One request per call: system + user message, fixed token ceiling and
//! temperature, bearer auth, client-level timeout. No retries. The wire
//! types are private to this module.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::llm::{CompletionFailure, ProviderError};

/// Adapter for any endpoint implementing the chat-completions shape.
///
/// Built once at startup; cloning is cheap because `reqwest::Client` is an
/// `Arc` internally.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_base: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// A missing `api_base` or `api_key` is accepted here; calls then fail
    /// with [`CompletionFailure::NotConfigured`] without touching the network.
    pub fn new(
        api_base: Option<String>,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { client, api_base, model, max_tokens, temperature, api_key })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// `(endpoint URL, api key)` when both settings are present and non-empty.
    fn credentials(&self) -> Option<(String, &str)> {
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let base = self.api_base.as_deref().map(str::trim).filter(|b| !b.is_empty())?;
        Some((completions_url(base), key))
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionFailure> {
        let (url, key) = self.credentials().ok_or(CompletionFailure::NotConfigured)?;

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: [
                Message { role: "system", content: system },
                Message { role: "user", content: user },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            %url,
            model = %self.model,
            system_len = system.len(),
            user_len = user.len(),
            "sending completion request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full completion request payload");
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(%url, error = %e, timeout = e.is_timeout(), "completion request failed (transport)");
                CompletionFailure::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(%status, error = %e, "failed to read completion response body");
            CompletionFailure::Transport(format!("failed to read response body: {e}"))
        })?;

        if status != StatusCode::OK {
            warn!(%status, detail = %error_detail(&body), "completion request returned HTTP error");
            return Err(CompletionFailure::UpstreamStatus(status.as_u16()));
        }

        trace!(body = %body, "full completion response payload");
        extract_content(&body)
    }
}

fn completions_url(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

/// First choice's message content, returned verbatim.
fn extract_content(body: &str) -> Result<String, CompletionFailure> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "failed to deserialize completion response");
        CompletionFailure::MalformedResponse(format!("failed to parse response body: {e}"))
    })?;

    debug!(choices = parsed.choices.len(), "received completion response");

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| {
            error!("completion response has no choice content");
            CompletionFailure::MalformedResponse("missing choices[0].message.content".into())
        })
}

/// Human-readable summary of an error body for the log, never for the client.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => match env.error.code {
            Some(serde_json::Value::String(code)) => format!("[code={code}] {}", env.error.message),
            Some(code) => format!("[code={code}] {}", env.error.message),
            None => env.error.message,
        },
        Err(_) => body.chars().take(512).collect(),
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}
