//! Run endpoints

use std::sync::Arc;

use axum::{body::Body, extract::State, Json};

use super::helpers::{parse_json_body, CatalogQuery};
use crate::api::dto::{DeletedResponse, IdQuery};
use crate::api::state::AppState;
use crate::error::CatalogError;
use crate::model::{NewRun, Run, RunFilter, RunUpdate};

/// GET /runs
pub async fn get_runs(
    State(state): State<Arc<AppState>>,
    CatalogQuery(filter): CatalogQuery<RunFilter>,
) -> Result<Json<Vec<Run>>, CatalogError> {
    Ok(Json(state.store.get_runs(&filter)?))
}

/// PUT /runs
///
/// Registers the run and makes its version the scenario's preferred one,
/// whatever the payload says.
pub async fn put_run(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<Run>, CatalogError> {
    let mut new: NewRun = parse_json_body(body).await?;
    new.prefer_this_version = true;
    Ok(Json(state.store.put_run(&new)?))
}

/// PUT /runs/legacy
///
/// Registers the run without touching the scenario's preferred version.
pub async fn put_run_legacy(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<Run>, CatalogError> {
    let mut new: NewRun = parse_json_body(body).await?;
    new.prefer_this_version = false;
    Ok(Json(state.store.put_run(&new)?))
}

/// PATCH /runs?id=
pub async fn update_run(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
    body: Body,
) -> Result<Json<Run>, CatalogError> {
    let update: RunUpdate = parse_json_body(body).await?;
    Ok(Json(state.store.update_run(query.id, &update)?))
}

/// DELETE /runs?id=
pub async fn delete_run(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
) -> Result<Json<DeletedResponse>, CatalogError> {
    state.store.delete_run(query.id)?;
    Ok(Json(DeletedResponse { deleted: 1 }))
}
