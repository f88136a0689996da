//! Assumption endpoints

use std::sync::Arc;

use axum::{body::Body, extract::State, Json};

use super::helpers::{parse_json_body, CatalogQuery};
use crate::api::dto::{DeletedResponse, IdQuery, ScenarioNameQuery};
use crate::api::state::AppState;
use crate::error::CatalogError;
use crate::model::{Assumption, AssumptionFilter, AssumptionUpdate, NewAssumption};

/// GET /assumptions
pub async fn get_assumptions(
    State(state): State<Arc<AppState>>,
    CatalogQuery(filter): CatalogQuery<AssumptionFilter>,
) -> Result<Json<Vec<Assumption>>, CatalogError> {
    Ok(Json(state.store.get_assumptions(&filter)?))
}

/// GET /assumptions/names
pub async fn get_assumption_kinds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, CatalogError> {
    Ok(Json(state.store.get_assumption_kinds()?))
}

/// GET /assumptions/scenario
pub async fn get_assumptions_for_scenario(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<ScenarioNameQuery>,
) -> Result<Json<Vec<Assumption>>, CatalogError> {
    Ok(Json(state.store.get_assumptions_for_scenario(&query.scenario)?))
}

/// PUT /assumptions
pub async fn put_assumption(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<Assumption>, CatalogError> {
    let new: NewAssumption = parse_json_body(body).await?;
    Ok(Json(state.store.put_assumption(&new)?))
}

/// PATCH /assumptions?id=
pub async fn update_assumption(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
    body: Body,
) -> Result<Json<Assumption>, CatalogError> {
    let update: AssumptionUpdate = parse_json_body(body).await?;
    Ok(Json(state.store.update_assumption(query.id, &update)?))
}

/// DELETE /assumptions?id=
pub async fn delete_assumption(
    State(state): State<Arc<AppState>>,
    CatalogQuery(query): CatalogQuery<IdQuery>,
) -> Result<Json<DeletedResponse>, CatalogError> {
    state.store.delete_assumption(query.id)?;
    Ok(Json(DeletedResponse { deleted: 1 }))
}
