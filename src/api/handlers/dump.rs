//! Catalog export endpoint

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::api::state::AppState;
use crate::error::CatalogError;
use crate::model::DumpDocument;

/// GET /dump
///
/// Serializes the whole catalog in one response. Mounted only when
/// downloads are allowed.
pub async fn get_dump(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DumpDocument>, CatalogError> {
    Ok(Json(state.store.dump()?))
}
