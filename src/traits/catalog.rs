//! Catalog operation contract shared by both facades

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::model::{
    Assumption, AssumptionFilter, AssumptionUpdate, NamedPath, NewAssumption, NewNamedPath,
    NewRun, NewScenario, PathFilter, PathUpdate, Run, RunFilter, RunUpdate, Scenario,
    ScenarioFilter, Timeseries,
};

/// Scenario results catalog operations
///
/// Implementations:
/// - `EmbeddedCatalog`: direct calls against a local store
/// - `RemoteCatalog`: HTTP calls against a served catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    // ========== Assumptions ==========

    /// Distinct assumption kinds present in the catalog
    async fn get_assumption_kinds(&self) -> CatalogResult<Vec<String>>;

    /// Assumptions matching the filter
    async fn get_assumptions(&self, filter: &AssumptionFilter) -> CatalogResult<Vec<Assumption>>;

    /// The assumptions bound to a scenario
    async fn get_assumptions_for_scenario(&self, scenario: &str)
        -> CatalogResult<Vec<Assumption>>;

    /// Create an assumption
    async fn put_assumption(&self, new: &NewAssumption) -> CatalogResult<Assumption>;

    /// Update an assumption in place
    async fn update_assumption(
        &self,
        id: i64,
        update: &AssumptionUpdate,
    ) -> CatalogResult<Assumption>;

    /// Delete an assumption
    async fn delete_assumption(&self, id: i64) -> CatalogResult<()>;

    // ========== Scenarios ==========

    /// Scenarios matching the filter
    async fn get_scenarios(&self, filter: &ScenarioFilter) -> CatalogResult<Vec<Scenario>>;

    /// Create a scenario with its assumption map
    async fn put_scenario(&self, new: &NewScenario) -> CatalogResult<Scenario>;

    /// Point a scenario's preferred version at an existing run version
    async fn update_scenario_version(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Scenario>;

    // ========== Runs ==========

    /// Runs matching the filter
    async fn get_runs(&self, filter: &RunFilter) -> CatalogResult<Vec<Run>>;

    /// Create a run
    ///
    /// Honors `prefer_this_version` on the payload.
    async fn put_run(&self, new: &NewRun) -> CatalogResult<Run>;

    /// Update a run in place
    async fn update_run(&self, id: i64, update: &RunUpdate) -> CatalogResult<Run>;

    /// Delete a run and its dependent records
    async fn delete_run(&self, id: i64) -> CatalogResult<()>;

    // ========== Paths ==========

    /// Named paths matching the filter
    async fn get_paths(&self, filter: &PathFilter) -> CatalogResult<Vec<NamedPath>>;

    /// Create a named path
    async fn put_path(&self, new: &NewNamedPath) -> CatalogResult<NamedPath>;

    /// The paths that carry data for a run
    async fn get_paths_in_run(&self, run_id: i64) -> CatalogResult<Vec<NamedPath>>;

    /// Update a named path in place
    async fn update_path(&self, id: i64, update: &PathUpdate) -> CatalogResult<NamedPath>;

    /// Delete a named path
    async fn delete_path(&self, id: i64) -> CatalogResult<()>;

    /// Seed the catalog with the built-in well-known paths
    async fn put_standard_paths(&self) -> CatalogResult<u64>;

    // ========== Timeseries ==========

    /// The points for one run and path, oldest first
    async fn get_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<Timeseries>;

    /// Every timeseries stored for a run
    async fn get_all_timeseries(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Vec<Timeseries>>;

    /// Store a block of points for one run and path
    async fn put_timeseries(&self, ts: &Timeseries) -> CatalogResult<Timeseries>;

    /// Delete the points for one run and path, returning how many went away
    async fn delete_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<u64>;

    /// Store many blocks, skipping the ones the catalog rejects
    ///
    /// Returns the blocks that landed, in input order.
    async fn put_many_timeseries(&self, series: &[Timeseries]) -> CatalogResult<Vec<Timeseries>> {
        let mut stored = Vec::with_capacity(series.len());
        for ts in series {
            match self.put_timeseries(ts).await {
                Ok(stored_ts) => stored.push(stored_ts),
                Err(e) => {
                    tracing::warn!(path = %ts.path, error = %e, "timeseries rejected, continuing");
                }
            }
        }
        Ok(stored)
    }
}
