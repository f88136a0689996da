//! Catalog data model

pub mod datetime;
pub mod dump;
pub mod entities;
pub mod enums;
pub mod params;
pub mod path;

// Re-export all types
#[allow(unused_imports)]
pub use dump::{DumpDocument, LoadCounts, LoadReport};

#[allow(unused_imports)]
pub use entities::{Assumption, Metric, MetricValue, NamedPath, Run, Scenario, Timeseries};

#[allow(unused_imports)]
pub use enums::{Interval, PathCategory, PeriodType};

#[allow(unused_imports)]
pub use params::{
    AssumptionFilter, AssumptionUpdate, NewAssumption, NewNamedPath, NewRun, NewScenario,
    PathFilter, PathUpdate, RunFilter, RunUpdate, ScenarioFilter,
};

#[allow(unused_imports)]
pub use path::{PathMatcher, PathParts};
