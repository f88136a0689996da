//! Request middleware

use std::sync::Arc;
use std::time::Instant;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::api::state::AppState;

/// Access logging middleware
///
/// Emits one line per request at the level configured in
/// [`AppState::access_level`]. The level is fixed at startup, so the match
/// runs against a plain value rather than a filter directive.
pub async fn access_log(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match state.access_level {
        tracing::Level::TRACE => {
            tracing::trace!(%method, %uri, status, elapsed_ms, "request")
        }
        tracing::Level::DEBUG => {
            tracing::debug!(%method, %uri, status, elapsed_ms, "request")
        }
        tracing::Level::INFO => {
            tracing::info!(%method, %uri, status, elapsed_ms, "request")
        }
        tracing::Level::WARN => {
            tracing::warn!(%method, %uri, status, elapsed_ms, "request")
        }
        tracing::Level::ERROR => {
            tracing::error!(%method, %uri, status, elapsed_ms, "request")
        }
    }

    response
}
