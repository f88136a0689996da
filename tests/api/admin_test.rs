//! Tests for /health, /dump, and the mount flags

use crate::common::*;

#[tokio::test]
async fn test_health_reports_version() {
    let app = test_app();

    let response = send(&app, "GET", "/health").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_dump_carries_whole_catalog() {
    let app = test_app();
    seed_baseline(&app).await;
    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;

    let response = send(&app, "GET", "/dump").await;
    let json = assert_ok_json(response).await;

    assert_eq!(json["assumptions"].as_array().unwrap().len(), 1);
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 1);
    assert_eq!(json["paths"].as_array().unwrap().len(), 1);
    assert_eq!(json["runs"].as_array().unwrap().len(), 1);
    assert_eq!(json["timeseries"].as_array().unwrap().len(), 1);
    assert_eq!(json["metrics"].as_array().unwrap().len(), 0);
    assert_eq!(json["metric_values"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_download_flag_hides_dump() {
    let app = test_app_with_flags(false, true);

    let response = send(&app, "GET", "/dump").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_editing_flag_gates_mutating_verbs() {
    let app = test_app_with_flags(true, false);
    seed_baseline(&app).await;

    // Writes that register records stay open
    let response = send_json(&app, "PUT", "/runs/legacy", &baseline_run("2024-02")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Edits and deletes are not mounted
    let patch = serde_json::json!({"detail": "x"});
    let response = send_json(&app, "PATCH", "/assumptions?id=1", &patch).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let response = send_json(&app, "PATCH", "/runs?id=1", &patch).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let response = send(&app, "DELETE", "/paths?id=1").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let response = send(
        &app,
        "DELETE",
        "/timeseries?scenario=Baseline&version=2024-01&path=shasta_storage",
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    // The version repoint route is not mounted at all
    let body = serde_json::json!({"scenario": "Baseline", "version": "2024-01"});
    let response = send_json(&app, "PUT", "/scenarios/version", &body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reads_work_with_flags_off() {
    let app = test_app_with_flags(false, false);
    seed_baseline(&app).await;

    let response = send(&app, "GET", "/scenarios").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "GET", "/runs").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app();

    let response = send(&app, "GET", "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_body_keeps_error_shape() {
    let app = test_app();

    let request = Request::put("/assumptions")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("invalid JSON body"));
}

#[tokio::test]
async fn test_malformed_query_keeps_error_shape() {
    let app = test_app();

    let response = send(&app, "DELETE", "/runs?id=not-a-number").await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("invalid query string"));
}

#[tokio::test]
async fn test_unknown_query_params_are_ignored() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send(&app, "GET", "/runs?sort=created&scenario=Baseline").await;
    assert_eq!(response.status(), StatusCode::OK);
}
