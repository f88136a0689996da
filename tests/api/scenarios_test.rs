//! Tests for the /scenarios endpoints

use crate::common::*;

#[tokio::test]
async fn test_put_scenario_returns_record() {
    let app = test_app();

    send_json(&app, "PUT", "/assumptions", &wet_hydrology()).await;
    let response = send_json(&app, "PUT", "/scenarios", &baseline_scenario()).await;
    let json = assert_ok_json(response).await;

    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Baseline");
    assert_eq!(json["assumptions"]["hydrology"], "wet hydrology");
    assert_eq!(json["version"], serde_json::Value::Null);
    assert_eq!(json["versions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_put_scenario_duplicate_name_conflicts() {
    let app = test_app();

    send_json(&app, "PUT", "/assumptions", &wet_hydrology()).await;
    send_json(&app, "PUT", "/scenarios", &baseline_scenario()).await;
    let response = send_json(&app, "PUT", "/scenarios", &baseline_scenario()).await;
    let detail = assert_error_detail(response, StatusCode::CONFLICT).await;
    assert!(detail.contains("name=Baseline"));
}

#[tokio::test]
async fn test_put_scenario_with_unknown_assumption_is_404() {
    let app = test_app();

    let body = serde_json::json!({
        "name": "Baseline",
        "assumptions": {"hydrology": "no such study"}
    });
    let response = send_json(&app, "PUT", "/scenarios", &body).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("kind=hydrology"));
    assert!(detail.contains("found 0"));
}

#[tokio::test]
async fn test_put_scenario_without_assumptions() {
    let app = test_app();

    let body = serde_json::json!({"name": "Empty Bundle"});
    let response = send_json(&app, "PUT", "/scenarios", &body).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["assumptions"], serde_json::json!({}));
}

#[tokio::test]
async fn test_get_scenarios_empty_catalog_is_404() {
    let app = test_app();

    let response = send(&app, "GET", "/scenarios").await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert_eq!(detail, "no scenarios found");
}

#[tokio::test]
async fn test_get_scenarios_filters_by_name() {
    let app = test_app();
    seed_baseline(&app).await;

    send_json(
        &app,
        "PUT",
        "/scenarios",
        &serde_json::json!({"name": "Future Conditions"}),
    )
    .await;

    let response = send(&app, "GET", "/scenarios?name=Baseline").await;
    let json = assert_ok_json(response).await;
    let list = json.as_array().expect("Body should be a list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Baseline");
}

#[tokio::test]
async fn test_scenario_version_tracks_preferred_run() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send(&app, "GET", "/scenarios?name=Baseline").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["version"], "2024-01");
    assert_eq!(json[0]["versions"], serde_json::json!(["2024-01"]));
}

#[tokio::test]
async fn test_update_scenario_version_repoints() {
    let app = test_app();
    seed_baseline(&app).await;
    send_json(&app, "PUT", "/runs", &baseline_run("2024-02")).await;

    // The new run took preference; point back at the original
    let body = serde_json::json!({"scenario": "Baseline", "version": "2024-01"});
    let response = send_json(&app, "PUT", "/scenarios/version", &body).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["version"], "2024-01");
    assert_eq!(json["versions"], serde_json::json!(["2024-01", "2024-02"]));
}

#[tokio::test]
async fn test_update_scenario_version_unknown_version_is_404() {
    let app = test_app();
    seed_baseline(&app).await;

    let body = serde_json::json!({"scenario": "Baseline", "version": "never-ran"});
    let response = send_json(&app, "PUT", "/scenarios/version", &body).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("version=never-ran"));
    assert!(detail.contains("found 0"));
}

#[tokio::test]
async fn test_update_scenario_version_unknown_scenario_is_404() {
    let app = test_app();
    seed_baseline(&app).await;

    let body = serde_json::json!({"scenario": "Nope", "version": "2024-01"});
    let response = send_json(&app, "PUT", "/scenarios/version", &body).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("scenario 'Nope' not found"));
}
