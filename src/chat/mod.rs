//! The chat exchange: validate the request, look up knowledge, compose the
//! prompt, call the gateway, assemble the reply.

pub mod prompt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::knowledge::{self, Source};
use crate::llm::CompletionGateway;

/// Validated inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// Why a request body could not become a [`ChatRequest`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// `message` absent or empty-ish (`null`, `false`, `0`, `""`, `[]`, `{}`). Maps to 400.
    #[error("Message is required")]
    MissingMessage,
    /// The body is not a JSON object, or `message` is some other non-string. Maps to 500.
    #[error("unreadable request body: {0}")]
    Malformed(String),
}

impl ChatRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| RequestError::Malformed(e.to_string()))?;
        let Some(fields) = value.as_object() else {
            return Err(RequestError::Malformed("body is not a JSON object".into()));
        };
        match fields.get("message") {
            Some(Value::String(m)) if !m.is_empty() => Ok(Self { message: m.clone() }),
            None => Err(RequestError::MissingMessage),
            Some(v) if is_blank(v) => Err(RequestError::MissingMessage),
            Some(v) => Err(RequestError::Malformed(format!("message is not text: {v}"))),
        }
    }
}

/// Values that count as "no message at all".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Reply envelope for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    /// Exactly the matched topic's sources, or empty.
    pub sources: &'static [Source],
    pub timestamp: DateTime<Utc>,
}

/// Run one exchange. Never fails: gateway failures arrive as apology text.
pub async fn respond(gateway: &CompletionGateway, request: &ChatRequest) -> ChatResponse {
    let matched = knowledge::match_topic(&request.message);
    info!(
        message_len = request.message.len(),
        topic = matched.map(|t| t.topic.key()).unwrap_or("none"),
        "chat request"
    );

    let system = prompt::system_prompt(matched);
    debug!(system_len = system.len(), "system prompt composed");

    let response = gateway.generate(&system, &request.message).await;

    ChatResponse {
        response,
        sources: matched.map(|t| t.sources).unwrap_or(&[]),
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::knowledge::{topic, Topic};
    use crate::llm::APOLOGY_NOT_CONFIGURED;

    fn dummy_gateway() -> CompletionGateway {
        let config = LlmConfig { provider: "dummy".into(), ..LlmConfig::default() };
        CompletionGateway::new(&config, None).unwrap()
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest { message: message.into() }
    }

    #[test]
    fn parses_message() {
        let req = ChatRequest::from_json(br#"{"message":"fire exits?","extra":1}"#).unwrap();
        assert_eq!(req.message, "fire exits?");
    }

    #[test]
    fn missing_or_empty_message_is_rejected() {
        let bodies: [&[u8]; 8] = [
            br#"{}"#,
            br#"{"message":""}"#,
            br#"{"message":null}"#,
            br#"{"message":false}"#,
            br#"{"message":0}"#,
            br#"{"message":0.0}"#,
            br#"{"message":[]}"#,
            br#"{"message":{}}"#,
        ];
        for body in bodies {
            assert_eq!(ChatRequest::from_json(body), Err(RequestError::MissingMessage));
        }
    }

    #[test]
    fn non_text_message_is_malformed() {
        let bodies: [&[u8]; 5] = [
            br#"{"message":42}"#,
            br#"{"message":-0.5}"#,
            br#"{"message":true}"#,
            br#"{"message":["fire"]}"#,
            br#"{"message":{"a":1}}"#,
        ];
        for body in bodies {
            assert!(matches!(ChatRequest::from_json(body), Err(RequestError::Malformed(_))));
        }
    }

    #[test]
    fn non_object_body_is_malformed() {
        let bodies: [&[u8]; 5] = [b"not json", b"", b"[]", b"null", br#""message""#];
        for body in bodies {
            assert!(matches!(ChatRequest::from_json(body), Err(RequestError::Malformed(_))));
        }
    }

    #[test]
    fn missing_message_text() {
        assert_eq!(RequestError::MissingMessage.to_string(), "Message is required");
    }

    #[tokio::test]
    async fn matched_topic_sources_are_returned() {
        let start = Utc::now();
        let reply = respond(&dummy_gateway(), &request("Which beam sizes are allowed?")).await;
        assert_eq!(reply.response, "[echo] Which beam sizes are allowed?");
        assert_eq!(reply.sources, topic(Topic::Structural).sources);
        assert!(reply.timestamp >= start);
    }

    #[tokio::test]
    async fn unmatched_message_has_no_sources() {
        let reply = respond(&dummy_gateway(), &request("Hello there")).await;
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_gateway_still_returns_sources() {
        let gateway = CompletionGateway::new(&LlmConfig::default(), None).unwrap();
        let reply = respond(&gateway, &request("smoke alarms")).await;
        assert_eq!(reply.response, APOLOGY_NOT_CONFIGURED);
        assert_eq!(reply.sources, topic(Topic::FireSafety).sources);
    }

    #[test]
    fn response_serializes_with_expected_keys() {
        let reply = ChatResponse {
            response: "ok".into(),
            sources: topic(Topic::Accessibility).sources,
            timestamp: Utc::now(),
        };
        let v = serde_json::to_value(&reply).unwrap();
        assert_eq!(v["response"], "ok");
        assert_eq!(v["sources"][0]["section"], "Section D3.1");
        assert_eq!(v["sources"][0]["title"], "Access for People with Disabilities");
        assert!(v["timestamp"].as_str().unwrap().parse::<DateTime<Utc>>().is_ok());
    }
}
