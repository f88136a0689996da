//! Data Transfer Objects (DTOs)

mod request;
mod response;

pub use request::{
    IdQuery, RunScopeQuery, ScenarioNameQuery, TimeseriesSelector, VersionUpdateRequest,
};
#[allow(unused_imports)]
pub use response::{DeletedResponse, HealthResponse, InsertedResponse};
