//! Handlers for the chat and health routes.

use std::any::Any;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::chat::{self, ChatRequest, RequestError};

use super::AppState;

const INTERNAL_ERROR: &str = "Internal server error";

fn json_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

/// POST /chat
pub(super) async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match ChatRequest::from_json(&body) {
        Ok(request) => request,
        Err(RequestError::MissingMessage) => {
            debug!("chat request rejected: no message");
            return json_error(StatusCode::BAD_REQUEST, "Message is required");
        }
        Err(RequestError::Malformed(detail)) => {
            error!(%detail, body_len = body.len(), "error in chat endpoint");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
    };

    let reply = chat::respond(&state.gateway, &request).await;
    (StatusCode::OK, Json(reply)).into_response()
}

/// GET /health
pub(super) async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": &*state.service_name }))
}

/// Catch-panic hook: log the payload, answer with the generic 500 body.
pub(super) fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };
    error!(panic = %detail, "handler panicked");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}
