//! Named path endpoints

use std::sync::Arc;

use axum::{body::Body, extract::State, Json};

use super::helpers::{parse_json_body, CatalogQuery};
use crate::api::dto::{DeletedResponse, IdQuery, InsertedResponse};
use crate::api::state::AppState;
use crate::error::CatalogError;
use crate::model::{NamedPath, NewNamedPath, PathFilter, PathUpdate};

/// GET /paths
pub async fn get_paths(
    State(state): State<Arc<AppState>>,
    CatalogQuery(filter): CatalogQuery<PathFilter>,
) -> Result<Json<Vec<NamedPath>>, CatalogError> {
    Ok(Json(state.store.get_paths(&filter)?))
}

/// PUT /paths
pub async fn put_path(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<NamedPath>, CatalogError> {
    let new: NewNamedPath = parse_json_body(body).await?;
    Ok(Json(state.store.put_path(&new)?))
}

/// GET /paths/run
pub async fn get_paths_in_run(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
) -> Result<Json<Vec<NamedPath>>, CatalogError> {
    Ok(Json(state.store.get_paths_in_run(query.id)?))
}

/// PUT /paths/standard
pub async fn put_standard_paths(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InsertedResponse>, CatalogError> {
    let inserted = state.store.put_standard_paths()?;
    Ok(Json(InsertedResponse { inserted }))
}

/// PATCH /paths?id=
pub async fn update_path(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
    body: Body,
) -> Result<Json<NamedPath>, CatalogError> {
    let update: PathUpdate = parse_json_body(body).await?;
    Ok(Json(state.store.update_path(query.id, &update)?))
}

/// DELETE /paths?id=
pub async fn delete_path(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
) -> Result<Json<DeletedResponse>, CatalogError> {
    state.store.delete_path(query.id)?;
    Ok(Json(DeletedResponse { deleted: 1 }))
}
