//! HTTP error responses

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::CatalogError;

/// Error response body
///
/// Every failing route answers with this shape, whatever the status.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong
    pub detail: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                recoverable = self.is_recoverable(),
                "request failed"
            );
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
