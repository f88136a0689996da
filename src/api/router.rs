//! Router setup and configuration

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};

use crate::api::handlers;
use crate::api::middleware::access_log;
use crate::api::state::AppState;

/// Create the API router
///
/// The read surface is always mounted. PATCH and DELETE verbs, the version
/// repoint route, and the dump route appear only when the corresponding
/// flags in [`AppState`] allow them. Requests for a verb that was left off
/// an existing path come back as 405, requests for an unmounted path as 404.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut assumptions = get(handlers::get_assumptions).put(handlers::put_assumption);
    let mut runs = get(handlers::get_runs).put(handlers::put_run);
    let mut paths = get(handlers::get_paths).put(handlers::put_path);
    let mut series = get(handlers::get_timeseries).put(handlers::put_timeseries);

    if state.allow_editing {
        assumptions = assumptions
            .patch(handlers::update_assumption)
            .delete(handlers::delete_assumption);
        runs = runs.patch(handlers::update_run).delete(handlers::delete_run);
        paths = paths
            .patch(handlers::update_path)
            .delete(handlers::delete_path);
        series = series.delete(handlers::delete_timeseries);
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/assumptions", assumptions)
        .route("/assumptions/names", get(handlers::get_assumption_kinds))
        .route(
            "/assumptions/scenario",
            get(handlers::get_assumptions_for_scenario),
        )
        .route(
            "/scenarios",
            get(handlers::get_scenarios).put(handlers::put_scenario),
        )
        .route("/runs", runs)
        .route("/runs/legacy", put(handlers::put_run_legacy))
        .route("/paths", paths)
        .route("/paths/run", get(handlers::get_paths_in_run))
        .route("/paths/standard", put(handlers::put_standard_paths))
        .route("/timeseries", series)
        .route("/timeseries/all", get(handlers::get_all_timeseries));

    if state.allow_editing {
        router = router.route(
            "/scenarios/version",
            put(handlers::update_scenario_version),
        );
    }

    if state.allow_download {
        router = router.route("/dump", get(handlers::get_dump));
    }

    router
        .layer(from_fn_with_state(state.clone(), access_log))
        .with_state(state)
}
