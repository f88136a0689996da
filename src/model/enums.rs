//! Closed vocabularies for named paths and timeseries metadata

use serde::{Deserialize, Serialize};

/// Category a named path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCategory {
    Delivery,
    Delta,
    Other,
    Salinity,
    Storage,
    UpstreamFlows,
    Wyt,
}

impl PathCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathCategory::Delivery => "delivery",
            PathCategory::Delta => "delta",
            PathCategory::Other => "other",
            PathCategory::Salinity => "salinity",
            PathCategory::Storage => "storage",
            PathCategory::UpstreamFlows => "upstream_flows",
            PathCategory::Wyt => "wyt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "delivery" => Some(PathCategory::Delivery),
            "delta" => Some(PathCategory::Delta),
            "other" => Some(PathCategory::Other),
            "salinity" => Some(PathCategory::Salinity),
            "storage" => Some(PathCategory::Storage),
            "upstream_flows" => Some(PathCategory::UpstreamFlows),
            "wyt" => Some(PathCategory::Wyt),
            _ => None,
        }
    }
}

/// How values within a period are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    /// Average over the period
    #[serde(rename = "PER-AVER")]
    PerAver,
    /// Accumulated over the period
    #[serde(rename = "PER-CUM")]
    PerCum,
    /// Instantaneous value at the timestamp
    #[serde(rename = "INST-VAL")]
    InstVal,
    /// Accumulated up to the timestamp
    #[serde(rename = "INST-CUM")]
    InstCum,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::PerAver => "PER-AVER",
            PeriodType::PerCum => "PER-CUM",
            PeriodType::InstVal => "INST-VAL",
            PeriodType::InstCum => "INST-CUM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PER-AVER" => Some(PeriodType::PerAver),
            "PER-CUM" => Some(PeriodType::PerCum),
            "INST-VAL" => Some(PeriodType::InstVal),
            "INST-CUM" => Some(PeriodType::InstCum),
            _ => None,
        }
    }
}

/// Spacing between consecutive timeseries values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1MON")]
    Monthly,
    #[serde(rename = "1YEAR")]
    Yearly,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Monthly => "1MON",
            Interval::Yearly => "1YEAR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1MON" => Some(Interval::Monthly),
            "1YEAR" => Some(Interval::Yearly),
            _ => None,
        }
    }
}
