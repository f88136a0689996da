//! Tests for the /runs endpoints

use crate::common::*;

#[tokio::test]
async fn test_put_run_returns_record() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send_json(&app, "PUT", "/runs", &baseline_run("2024-02")).await;
    let json = assert_ok_json(response).await;

    assert_eq!(json["scenario"], "Baseline");
    assert_eq!(json["version"], "2024-02");
    assert_eq!(json["contact"], "modeling@water.example");
    assert_eq!(json["parent"], serde_json::Value::Null);
    assert_eq!(json["children"], serde_json::json!([]));
    assert_eq!(json["confidential"], false);
    assert_eq!(json["published"], false);
}

#[tokio::test]
async fn test_put_run_unknown_scenario_is_404() {
    let app = test_app();

    let body = serde_json::json!({
        "scenario": "Nope",
        "version": "2024-01",
        "contact": "modeling@water.example",
        "code_version": "9.0.1",
        "detail": "orphan run"
    });
    let response = send_json(&app, "PUT", "/runs", &body).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("scenario 'Nope' not found"));
}

#[tokio::test]
async fn test_put_run_duplicate_version_conflicts() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send_json(&app, "PUT", "/runs", &baseline_run("2024-01")).await;
    let detail = assert_error_detail(response, StatusCode::CONFLICT).await;
    assert!(detail.contains("scenario=Baseline"));
    assert!(detail.contains("version=2024-01"));
}

#[tokio::test]
async fn test_put_run_takes_preference() {
    let app = test_app();
    seed_baseline(&app).await;

    send_json(&app, "PUT", "/runs", &baseline_run("2024-02")).await;

    let response = send(&app, "GET", "/scenarios?name=Baseline").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["version"], "2024-02");
}

#[tokio::test]
async fn test_put_run_legacy_leaves_preference() {
    let app = test_app();
    seed_baseline(&app).await;

    send_json(&app, "PUT", "/runs/legacy", &baseline_run("2023-12")).await;

    let response = send(&app, "GET", "/scenarios?name=Baseline").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["version"], "2024-01");
    assert_eq!(json[0]["versions"], serde_json::json!(["2024-01", "2023-12"]));
}

#[tokio::test]
async fn test_run_lineage() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut derived = baseline_run("2024-02");
    derived["parent"] = serde_json::json!("2024-01");
    let response = send_json(&app, "PUT", "/runs", &derived).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["parent"], "2024-01");

    let response = send(&app, "GET", "/runs?scenario=Baseline&version=2024-01").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["children"], serde_json::json!(["2024-02"]));
}

#[tokio::test]
async fn test_put_run_unknown_parent_is_404() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut derived = baseline_run("2024-02");
    derived["parent"] = serde_json::json!("never-ran");
    let response = send_json(&app, "PUT", "/runs", &derived).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("version=never-ran"));
}

#[tokio::test]
async fn test_get_runs_empty_catalog_is_404() {
    let app = test_app();

    let response = send(&app, "GET", "/runs").await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert_eq!(detail, "no runs found");
}

#[tokio::test]
async fn test_get_runs_filters() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut other = baseline_run("2024-02");
    other["contact"] = serde_json::json!("ops@water.example");
    other["code_version"] = serde_json::json!("9.1.0");
    send_json(&app, "PUT", "/runs", &other).await;

    let response = send(&app, "GET", "/runs?scenario=Baseline").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let response = send(&app, "GET", "/runs?version=2024-02").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["code_version"], "9.1.0");

    let response = send(&app, "GET", "/runs?contact=ops@water.example").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = send(&app, "GET", "/runs?code_version=0.0.0").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_run_fields() {
    let app = test_app();
    seed_baseline(&app).await;

    let patch = serde_json::json!({"published": true, "detail": "reviewed"});
    let response = send_json(&app, "PATCH", "/runs?id=1", &patch).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["published"], true);
    assert_eq!(json["detail"], "reviewed");
    assert_eq!(json["version"], "2024-01");
}

#[tokio::test]
async fn test_patch_run_renames_version() {
    let app = test_app();
    seed_baseline(&app).await;

    let patch = serde_json::json!({"version": "2024-01a"});
    let response = send_json(&app, "PATCH", "/runs?id=1", &patch).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["version"], "2024-01a");

    // History follows the rename
    let response = send(&app, "GET", "/scenarios?name=Baseline").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["version"], "2024-01a");
    assert_eq!(json[0]["versions"], serde_json::json!(["2024-01a"]));
}

#[tokio::test]
async fn test_patch_run_version_collision_conflicts() {
    let app = test_app();
    seed_baseline(&app).await;
    send_json(&app, "PUT", "/runs", &baseline_run("2024-02")).await;

    let patch = serde_json::json!({"version": "2024-02"});
    let response = send_json(&app, "PATCH", "/runs?id=1", &patch).await;
    let detail = assert_error_detail(response, StatusCode::CONFLICT).await;
    assert!(detail.contains("version=2024-02"));
}

#[tokio::test]
async fn test_delete_run_clears_history_and_preference() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send(&app, "DELETE", "/runs?id=1").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["deleted"], 1);

    let response = send(&app, "GET", "/runs").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/scenarios?name=Baseline").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["version"], serde_json::Value::Null);
    assert_eq!(json[0]["versions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_delete_parent_orphans_children() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut derived = baseline_run("2024-02");
    derived["parent"] = serde_json::json!("2024-01");
    send_json(&app, "PUT", "/runs", &derived).await;

    let response = send(&app, "DELETE", "/runs?id=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/runs?scenario=Baseline&version=2024-02").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["parent"], serde_json::Value::Null);
}
