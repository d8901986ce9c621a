//! Axum HTTP surface.
//!
//! ## URL layout
//!
//! ```text
//! POST /chat        POST /api/chat
//! GET  /health      GET  /api/health
//! ```
//!
//! Every route sits behind a catch-panic layer that turns a handler panic
//! into `500 {"error": "Internal server error"}`, and optionally behind a
//! permissive CORS layer. `run` wires a [`CancellationToken`] into axum's
//! graceful shutdown.

mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::llm::CompletionGateway;

/// Router state injected into every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<CompletionGateway>,
    /// Reported by `GET /health`.
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(gateway: CompletionGateway, service_name: &str) -> Self {
        Self { gateway: Arc::new(gateway), service_name: Arc::from(service_name) }
    }
}

/// Build the full router: routes at `/` and under `/api`, plus layers.
pub fn build_router(state: AppState, cors: bool) -> Router {
    assemble(routes(), state, cors)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(api::chat))
        .route("/health", get(api::health))
}

/// Mount `routes` at `/` and `/api`, then apply catch-panic and CORS.
fn assemble(routes: Router<AppState>, state: AppState, cors: bool) -> Router {
    let router = Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(CatchPanicLayer::custom(api::panic_response))
        .with_state(state);

    if cors { router.layer(CorsLayer::permissive()) } else { router }
}

/// Bind `config.bind` and serve until `shutdown` is cancelled.
pub async fn run(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {}: {e}", config.bind)))?;

    serve(listener, build_router(state, config.cors), shutdown).await
}

/// Serve `router` on an already-bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let local_addr = listener.local_addr()?;
    info!(%local_addr, "http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!(%local_addr, "http server shut down");
    Ok(())
}
