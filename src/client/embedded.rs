//! In-process catalog facade

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::model::{
    Assumption, AssumptionFilter, AssumptionUpdate, NamedPath, NewAssumption, NewNamedPath,
    NewRun, NewScenario, PathFilter, PathUpdate, Run, RunFilter, RunUpdate, Scenario,
    ScenarioFilter, Timeseries,
};
use crate::storage::CatalogStore;
use crate::traits::Catalog;

/// Catalog facade over a local store
///
/// Calls go straight to the store on the calling task.
#[derive(Clone)]
pub struct EmbeddedCatalog {
    store: Arc<CatalogStore>,
}

impl EmbeddedCatalog {
    /// Open or create a catalog database at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Ok(Self {
            store: Arc::new(CatalogStore::new(path)?),
        })
    }

    /// Open an existing catalog database
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Ok(Self {
            store: Arc::new(CatalogStore::open(path)?),
        })
    }

    /// In-memory catalog (for testing)
    pub fn in_memory() -> CatalogResult<Self> {
        Ok(Self {
            store: Arc::new(CatalogStore::in_memory()?),
        })
    }

    /// Wrap an existing store handle
    pub fn with_store(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }
}

#[async_trait]
impl Catalog for EmbeddedCatalog {
    async fn get_assumption_kinds(&self) -> CatalogResult<Vec<String>> {
        self.store.get_assumption_kinds()
    }

    async fn get_assumptions(&self, filter: &AssumptionFilter) -> CatalogResult<Vec<Assumption>> {
        self.store.get_assumptions(filter)
    }

    async fn get_assumptions_for_scenario(
        &self,
        scenario: &str,
    ) -> CatalogResult<Vec<Assumption>> {
        self.store.get_assumptions_for_scenario(scenario)
    }

    async fn put_assumption(&self, new: &NewAssumption) -> CatalogResult<Assumption> {
        self.store.put_assumption(new)
    }

    async fn update_assumption(
        &self,
        id: i64,
        update: &AssumptionUpdate,
    ) -> CatalogResult<Assumption> {
        self.store.update_assumption(id, update)
    }

    async fn delete_assumption(&self, id: i64) -> CatalogResult<()> {
        self.store.delete_assumption(id)
    }

    async fn get_scenarios(&self, filter: &ScenarioFilter) -> CatalogResult<Vec<Scenario>> {
        self.store.get_scenarios(filter)
    }

    async fn put_scenario(&self, new: &NewScenario) -> CatalogResult<Scenario> {
        self.store.put_scenario(new)
    }

    async fn update_scenario_version(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Scenario> {
        self.store.update_scenario_version(scenario, version)
    }

    async fn get_runs(&self, filter: &RunFilter) -> CatalogResult<Vec<Run>> {
        self.store.get_runs(filter)
    }

    async fn put_run(&self, new: &NewRun) -> CatalogResult<Run> {
        self.store.put_run(new)
    }

    async fn update_run(&self, id: i64, update: &RunUpdate) -> CatalogResult<Run> {
        self.store.update_run(id, update)
    }

    async fn delete_run(&self, id: i64) -> CatalogResult<()> {
        self.store.delete_run(id)
    }

    async fn get_paths(&self, filter: &PathFilter) -> CatalogResult<Vec<NamedPath>> {
        self.store.get_paths(filter)
    }

    async fn put_path(&self, new: &NewNamedPath) -> CatalogResult<NamedPath> {
        self.store.put_path(new)
    }

    async fn get_paths_in_run(&self, run_id: i64) -> CatalogResult<Vec<NamedPath>> {
        self.store.get_paths_in_run(run_id)
    }

    async fn update_path(&self, id: i64, update: &PathUpdate) -> CatalogResult<NamedPath> {
        self.store.update_path(id, update)
    }

    async fn delete_path(&self, id: i64) -> CatalogResult<()> {
        self.store.delete_path(id)
    }

    async fn put_standard_paths(&self) -> CatalogResult<u64> {
        self.store.put_standard_paths()
    }

    async fn get_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<Timeseries> {
        self.store.get_timeseries(scenario, version, path)
    }

    async fn get_all_timeseries(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Vec<Timeseries>> {
        self.store.get_all_timeseries(scenario, version)
    }

    async fn put_timeseries(&self, ts: &Timeseries) -> CatalogResult<Timeseries> {
        self.store.put_timeseries(ts)
    }

    async fn delete_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<u64> {
        self.store.delete_timeseries(scenario, version, path)
    }
}
