//! Timeseries endpoints

use std::sync::Arc;

use axum::{body::Body, extract::State, Json};

use super::helpers::{parse_json_body, CatalogQuery};
use crate::api::dto::{DeletedResponse, RunScopeQuery, TimeseriesSelector};
use crate::api::state::AppState;
use crate::error::CatalogError;
use crate::model::Timeseries;

/// GET /timeseries
pub async fn get_timeseries(
    State(state): State<Arc<AppState>>,
    CatalogQuery(selector): CatalogQuery<TimeseriesSelector>,
) -> Result<Json<Timeseries>, CatalogError> {
    Ok(Json(state.store.get_timeseries(
        &selector.scenario,
        &selector.version,
        &selector.path,
    )?))
}

/// GET /timeseries/all
pub async fn get_all_timeseries(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<RunScopeQuery>,
) -> Result<Json<Vec<Timeseries>>, CatalogError> {
    Ok(Json(
        state
            .store
            .get_all_timeseries(&query.scenario, &query.version)?,
    ))
}

/// PUT /timeseries
pub async fn put_timeseries(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<Timeseries>, CatalogError> {
    let block: Timeseries = parse_json_body(body).await?;
    Ok(Json(state.store.put_timeseries(&block)?))
}

/// DELETE /timeseries
pub async fn delete_timeseries(
    State(state): State<Arc<AppState>>,
    CatalogQuery(selector): CatalogQuery<TimeseriesSelector>,
) -> Result<Json<DeletedResponse>, CatalogError> {
    let deleted = state.store.delete_timeseries(
        &selector.scenario,
        &selector.version,
        &selector.path,
    )?;
    Ok(Json(DeletedResponse { deleted }))
}
