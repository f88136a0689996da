//! Request DTOs

use serde::Deserialize;

/// Query string selecting records that belong to one scenario
#[derive(Debug, Deserialize)]
pub struct ScenarioNameQuery {
    /// Scenario name
    pub scenario: String,
}

/// Query string addressing one record by id
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    /// Database id of the record
    pub id: i64,
}

/// Query string addressing one run
#[derive(Debug, Deserialize)]
pub struct RunScopeQuery {
    /// Scenario name
    pub scenario: String,

    /// Run version within the scenario
    pub version: String,
}

/// Query string addressing one timeseries block
#[derive(Debug, Deserialize)]
pub struct TimeseriesSelector {
    /// Scenario name
    pub scenario: String,

    /// Run version within the scenario
    pub version: String,

    /// Named path name, or a full path string
    pub path: String,
}

/// Body repointing a scenario's preferred version
#[derive(Debug, Deserialize)]
pub struct VersionUpdateRequest {
    /// Scenario name
    pub scenario: String,

    /// Version the scenario should prefer from now on
    pub version: String,
}
