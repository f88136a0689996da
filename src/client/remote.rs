//! HTTP catalog facade

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{
    Assumption, AssumptionFilter, AssumptionUpdate, DumpDocument, NamedPath, NewAssumption,
    NewNamedPath, NewRun, NewScenario, PathFilter, PathUpdate, Run, RunFilter, RunUpdate,
    Scenario, ScenarioFilter, Timeseries,
};
use crate::traits::Catalog;

/// Error body shape served by the catalog API
#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

#[derive(Deserialize)]
struct Deleted {
    deleted: u64,
}

#[derive(Deserialize)]
struct Inserted {
    inserted: u64,
}

#[derive(Serialize)]
struct VersionBody<'a> {
    scenario: &'a str,
    version: &'a str,
}

/// Catalog facade over a served catalog
///
/// Same operations as `EmbeddedCatalog`, carried over HTTP. Server-side
/// errors come back as `CatalogError::Remote` with the upstream status.
pub struct RemoteCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteCatalog {
    /// Connect to a served catalog at `base_url`
    pub fn new(base_url: impl Into<String>) -> CatalogResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Connect with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("http client: {}", e)))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body or reconstruct the catalog error
    async fn check<T: DeserializeOwned>(response: reqwest::Response) -> CatalogResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let detail = match response.json::<ErrorDetail>().await {
            Ok(body) => body.detail,
            Err(_) => format!("status {}", status),
        };
        Err(CatalogError::from_status(status, detail))
    }

    /// Fetch the complete catalog dump
    pub async fn dump(&self) -> CatalogResult<DumpDocument> {
        let response = self.client.get(self.url("/dump")).send().await?;
        Self::check(response).await
    }
}

#[async_trait]
impl Catalog for RemoteCatalog {
    async fn get_assumption_kinds(&self) -> CatalogResult<Vec<String>> {
        let response = self
            .client
            .get(self.url("/assumptions/names"))
            .send()
            .await?;
        Self::check(response).await
    }

    async fn get_assumptions(&self, filter: &AssumptionFilter) -> CatalogResult<Vec<Assumption>> {
        let response = self
            .client
            .get(self.url("/assumptions"))
            .query(filter)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn get_assumptions_for_scenario(
        &self,
        scenario: &str,
    ) -> CatalogResult<Vec<Assumption>> {
        let response = self
            .client
            .get(self.url("/assumptions/scenario"))
            .query(&[("scenario", scenario)])
            .send()
            .await?;
        Self::check(response).await
    }

    async fn put_assumption(&self, new: &NewAssumption) -> CatalogResult<Assumption> {
        let response = self
            .client
            .put(self.url("/assumptions"))
            .json(new)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn update_assumption(
        &self,
        id: i64,
        update: &AssumptionUpdate,
    ) -> CatalogResult<Assumption> {
        let response = self
            .client
            .patch(self.url("/assumptions"))
            .query(&[("id", id)])
            .json(update)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn delete_assumption(&self, id: i64) -> CatalogResult<()> {
        let response = self
            .client
            .delete(self.url("/assumptions"))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::check::<Deleted>(response).await?;
        Ok(())
    }

    async fn get_scenarios(&self, filter: &ScenarioFilter) -> CatalogResult<Vec<Scenario>> {
        let response = self
            .client
            .get(self.url("/scenarios"))
            .query(filter)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn put_scenario(&self, new: &NewScenario) -> CatalogResult<Scenario> {
        let response = self
            .client
            .put(self.url("/scenarios"))
            .json(new)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn update_scenario_version(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Scenario> {
        let response = self
            .client
            .put(self.url("/scenarios/version"))
            .json(&VersionBody { scenario, version })
            .send()
            .await?;
        Self::check(response).await
    }

    async fn get_runs(&self, filter: &RunFilter) -> CatalogResult<Vec<Run>> {
        let response = self
            .client
            .get(self.url("/runs"))
            .query(filter)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn put_run(&self, new: &NewRun) -> CatalogResult<Run> {
        // The preference split is carried by the route, not the body
        let endpoint = if new.prefer_this_version {
            "/runs"
        } else {
            "/runs/legacy"
        };
        let response = self.client.put(self.url(endpoint)).json(new).send().await?;
        Self::check(response).await
    }

    async fn update_run(&self, id: i64, update: &RunUpdate) -> CatalogResult<Run> {
        let response = self
            .client
            .patch(self.url("/runs"))
            .query(&[("id", id)])
            .json(update)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn delete_run(&self, id: i64) -> CatalogResult<()> {
        let response = self
            .client
            .delete(self.url("/runs"))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::check::<Deleted>(response).await?;
        Ok(())
    }

    async fn get_paths(&self, filter: &PathFilter) -> CatalogResult<Vec<NamedPath>> {
        let response = self
            .client
            .get(self.url("/paths"))
            .query(filter)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn put_path(&self, new: &NewNamedPath) -> CatalogResult<NamedPath> {
        let response = self.client.put(self.url("/paths")).json(new).send().await?;
        Self::check(response).await
    }

    async fn get_paths_in_run(&self, run_id: i64) -> CatalogResult<Vec<NamedPath>> {
        let response = self
            .client
            .get(self.url("/paths/run"))
            .query(&[("id", run_id)])
            .send()
            .await?;
        Self::check(response).await
    }

    async fn update_path(&self, id: i64, update: &PathUpdate) -> CatalogResult<NamedPath> {
        let response = self
            .client
            .patch(self.url("/paths"))
            .query(&[("id", id)])
            .json(update)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn delete_path(&self, id: i64) -> CatalogResult<()> {
        let response = self
            .client
            .delete(self.url("/paths"))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::check::<Deleted>(response).await?;
        Ok(())
    }

    async fn put_standard_paths(&self) -> CatalogResult<u64> {
        let response = self.client.put(self.url("/paths/standard")).send().await?;
        let body: Inserted = Self::check(response).await?;
        Ok(body.inserted)
    }

    async fn get_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<Timeseries> {
        let response = self
            .client
            .get(self.url("/timeseries"))
            .query(&[("scenario", scenario), ("version", version), ("path", path)])
            .send()
            .await?;
        Self::check(response).await
    }

    async fn get_all_timeseries(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Vec<Timeseries>> {
        let response = self
            .client
            .get(self.url("/timeseries/all"))
            .query(&[("scenario", scenario), ("version", version)])
            .send()
            .await?;
        Self::check(response).await
    }

    async fn put_timeseries(&self, ts: &Timeseries) -> CatalogResult<Timeseries> {
        let response = self
            .client
            .put(self.url("/timeseries"))
            .json(ts)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn delete_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<u64> {
        let response = self
            .client
            .delete(self.url("/timeseries"))
            .query(&[("scenario", scenario), ("version", version), ("path", path)])
            .send()
            .await?;
        let body: Deleted = Self::check(response).await?;
        Ok(body.deleted)
    }
}
