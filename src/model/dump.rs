//! Dump document and load report shapes

use serde::{Deserialize, Serialize};

use super::entities::{Assumption, Metric, MetricValue, NamedPath, Run, Scenario, Timeseries};

/// Complete catalog contents, suitable for re-loading elsewhere
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpDocument {
    #[serde(default)]
    pub assumptions: Vec<Assumption>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub paths: Vec<NamedPath>,
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default)]
    pub timeseries: Vec<Timeseries>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub metric_values: Vec<MetricValue>,
}

/// Per-family outcome counts for one load pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCounts {
    pub created: usize,
    pub skipped: usize,
}

/// What a load pass did, family by family
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub assumptions: LoadCounts,
    pub scenarios: LoadCounts,
    pub paths: LoadCounts,
    pub runs: LoadCounts,
    pub timeseries: LoadCounts,
    pub metrics: LoadCounts,
    pub metric_values: LoadCounts,
}
