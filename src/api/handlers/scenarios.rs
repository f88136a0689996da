//! Scenario endpoints

use std::sync::Arc;

use axum::{body::Body, extract::State, Json};

use super::helpers::{parse_json_body, CatalogQuery};
use crate::api::dto::VersionUpdateRequest;
use crate::api::state::AppState;
use crate::error::CatalogError;
use crate::model::{NewScenario, Scenario, ScenarioFilter};

/// GET /scenarios
pub async fn get_scenarios(
    State(state): State<Arc<AppState>>,
    CatalogQuery(filter): CatalogQuery<ScenarioFilter>,
) -> Result<Json<Vec<Scenario>>, CatalogError> {
    Ok(Json(state.store.get_scenarios(&filter)?))
}

/// PUT /scenarios
pub async fn put_scenario(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<Scenario>, CatalogError> {
    let new: NewScenario = parse_json_body(body).await?;
    Ok(Json(state.store.put_scenario(&new)?))
}

/// PUT /scenarios/version
pub async fn update_scenario_version(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<Scenario>, CatalogError> {
    let request: VersionUpdateRequest = parse_json_body(body).await?;
    Ok(Json(
        state
            .store
            .update_scenario_version(&request.scenario, &request.version)?,
    ))
}
