//! Health endpoint

use axum::Json;

use crate::api::dto::HealthResponse;

/// GET /health
///
/// Answers as long as the process is up. Storage problems surface on the
/// data routes, not here.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
