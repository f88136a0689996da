//! Catalog entity records
//!
//! These are the canonical shapes exchanged by the store, the HTTP surface,
//! and both client facades. Database row ids are `Option<i64>` so the same
//! records serve as wire payloads in dump documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::{Interval, PathCategory, PeriodType};

/// A single model input decision, identified by (name, kind)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub kind: String,
    pub detail: String,
}

/// A named bundle of assumptions, one per kind, with run version history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    /// Assumption name per kind
    pub assumptions: BTreeMap<String, String>,
    /// Version of the preferred run, if one is set
    #[serde(default)]
    pub version: Option<String>,
    /// Every version in this scenario's history, oldest first
    #[serde(default)]
    pub versions: Vec<String>,
}

/// One simulation execution of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub id: Option<i64>,
    pub scenario: String,
    pub version: String,
    pub contact: String,
    pub code_version: String,
    pub detail: String,
    /// Version of the run this one derives from, within the same scenario
    #[serde(default)]
    pub parent: Option<String>,
    /// Versions of runs derived from this one
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub confidential: bool,
    #[serde(default)]
    pub published: bool,
}

/// A well-known dataset location with display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPath {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub path: String,
    pub category: PathCategory,
    pub period_type: PeriodType,
    pub interval: Interval,
    pub units: String,
    pub detail: String,
}

/// A dense block of (datetime, value) points for one run and path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeseries {
    pub scenario: String,
    pub version: String,
    pub path: String,
    pub values: Vec<f64>,
    pub dates: Vec<String>,
    pub period_type: PeriodType,
    pub units: String,
    pub interval: Interval,
}

/// Reserved: a derived statistic definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub index_detail: String,
    pub detail: String,
}

/// Reserved: one metric evaluation for a (path, run, metric) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub path_id: i64,
    pub run_id: i64,
    pub metric_id: i64,
    #[serde(rename = "index")]
    pub idx: i64,
    pub units: String,
    pub value: f64,
}
