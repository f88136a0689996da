//! External timeseries container interface

use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::model::{Interval, PathParts, PeriodType};

/// One series pulled out of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Container path in `/A/B/C/D/E/F/` form
    pub path: String,
    pub values: Vec<f64>,
    /// ISO-8601 datetimes, one per value
    pub dates: Vec<String>,
    pub period_type: PeriodType,
    pub units: String,
    pub interval: Interval,
}

/// Read access to an external timeseries container
///
/// A handle stays open for repeated reads and releases the underlying
/// resource when dropped. `JsonSeriesFile` is the shipped implementation;
/// binary container readers plug in through the same trait.
pub trait SeriesReader: Send + Sync {
    /// Every series whose path matches the pattern
    ///
    /// Empty pattern parts match anything; the D part is a regex.
    fn read_matching(&self, pattern: &PathParts) -> CatalogResult<Vec<SeriesRecord>>;
}
