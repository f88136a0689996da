//! HTTP request handlers

mod assumptions;
mod dump;
mod health;
mod helpers;
mod paths;
mod runs;
mod scenarios;
mod timeseries;

pub use assumptions::{
    delete_assumption, get_assumption_kinds, get_assumptions, get_assumptions_for_scenario,
    put_assumption, update_assumption,
};
pub use dump::get_dump;
pub use health::health_check;
pub use paths::{
    delete_path, get_paths, get_paths_in_run, put_path, put_standard_paths, update_path,
};
pub use runs::{delete_run, get_runs, put_run, put_run_legacy, update_run};
pub use scenarios::{get_scenarios, put_scenario, update_scenario_version};
pub use timeseries::{delete_timeseries, get_all_timeseries, get_timeseries, put_timeseries};
