//! Tests for the /paths endpoints

use crate::common::*;

#[tokio::test]
async fn test_put_path_returns_record() {
    let app = test_app();

    let response = send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let json = assert_ok_json(response).await;

    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "shasta_storage");
    assert_eq!(json["path"], "/CALSIM/S_SHSTA/STORAGE//1MON/L2020A/");
    assert_eq!(json["category"], "storage");
    assert_eq!(json["period_type"], "PER-AVER");
    assert_eq!(json["interval"], "1MON");
    assert_eq!(json["units"], "TAF");
}

#[tokio::test]
async fn test_put_path_normalizes_part_whitespace() {
    let app = test_app();

    let mut body = shasta_path();
    body["path"] = serde_json::json!("/CALSIM/ S_SHSTA /STORAGE/ /1MON/L2020A/");
    let response = send_json(&app, "PUT", "/paths", &body).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["path"], "/CALSIM/S_SHSTA/STORAGE//1MON/L2020A/");
}

#[tokio::test]
async fn test_put_path_malformed_path_is_400() {
    let app = test_app();

    let mut body = shasta_path();
    body["path"] = serde_json::json!("/CALSIM/S_SHSTA/STORAGE/1MON/L2020A/");
    let response = send_json(&app, "PUT", "/paths", &body).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("six parts"));
}

#[tokio::test]
async fn test_put_path_unknown_vocabulary_is_400() {
    let app = test_app();

    let mut body = shasta_path();
    body["category"] = serde_json::json!("reservoir");
    let response = send_json(&app, "PUT", "/paths", &body).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("unknown category 'reservoir'"));

    let mut body = shasta_path();
    body["period_type"] = serde_json::json!("AVG");
    let response = send_json(&app, "PUT", "/paths", &body).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("unknown period type 'AVG'"));

    let mut body = shasta_path();
    body["interval"] = serde_json::json!("1DAY");
    let response = send_json(&app, "PUT", "/paths", &body).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("unknown interval '1DAY'"));
}

#[tokio::test]
async fn test_put_path_duplicate_name_in_category_conflicts() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let response = send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let detail = assert_error_detail(response, StatusCode::CONFLICT).await;
    assert!(detail.contains("name=shasta_storage"));
    assert!(detail.contains("category=storage"));
}

#[tokio::test]
async fn test_same_name_in_another_category_is_allowed() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let mut body = shasta_path();
    body["category"] = serde_json::json!("other");
    body["path"] = serde_json::json!("/CALSIM/S_SHSTA/STORAGE-ALT//1MON/L2020A/");
    let response = send_json(&app, "PUT", "/paths", &body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_paths_empty_catalog_is_404() {
    let app = test_app();

    let response = send(&app, "GET", "/paths").await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert_eq!(detail, "no paths found");
}

#[tokio::test]
async fn test_get_paths_filters_by_category() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let delta = serde_json::json!({
        "name": "delta_outflow",
        "path": "/CALSIM/NDOI//TAF/1MON/L2020A/",
        "category": "delta",
        "period_type": "PER-AVER",
        "interval": "1MON",
        "units": "CFS",
        "detail": "Net Delta outflow index"
    });
    send_json(&app, "PUT", "/paths", &delta).await;

    let response = send(&app, "GET", "/paths?category=delta").await;
    let json = assert_ok_json(response).await;
    let list = json.as_array().expect("Body should be a list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "delta_outflow");
}

#[tokio::test]
async fn test_get_paths_filter_normalizes_path() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;

    let spaced = "/CALSIM/%20S_SHSTA%20/STORAGE//1MON/L2020A/";
    let response = send(&app, "GET", &format!("/paths?path={}", spaced)).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json[0]["name"], "shasta_storage");
}

#[tokio::test]
async fn test_get_paths_in_run_follows_stored_data() {
    let app = test_app();
    seed_baseline(&app).await;

    // Nothing stored yet, so the run's catalog is empty
    let response = send(&app, "GET", "/paths/run?id=1").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json, serde_json::json!([]));

    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;

    let response = send(&app, "GET", "/paths/run?id=1").await;
    let json = assert_ok_json(response).await;
    let list = json.as_array().expect("Body should be a list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "shasta_storage");
}

#[tokio::test]
async fn test_put_standard_paths_is_idempotent() {
    let app = test_app();

    let response = send(&app, "PUT", "/paths/standard").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["inserted"], 15);

    let response = send(&app, "PUT", "/paths/standard").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["inserted"], 0);

    let response = send(&app, "GET", "/paths").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_patch_path_updates_units() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let patch = serde_json::json!({"units": "AF", "detail": "storage in acre-feet"});
    let response = send_json(&app, "PATCH", "/paths?id=1", &patch).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["units"], "AF");
    assert_eq!(json["detail"], "storage in acre-feet");
}

#[tokio::test]
async fn test_patch_path_bad_vocabulary_is_400() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let patch = serde_json::json!({"interval": "2MON"});
    let response = send_json(&app, "PATCH", "/paths?id=1", &patch).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_path() {
    let app = test_app();

    send_json(&app, "PUT", "/paths", &shasta_path()).await;
    let response = send(&app, "DELETE", "/paths?id=1").await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["deleted"], 1);

    let response = send(&app, "GET", "/paths").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_path_with_data_is_rejected() {
    let app = test_app();
    seed_baseline(&app).await;
    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;

    let response = send(&app, "DELETE", "/paths?id=1").await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("carries data for 1 run(s)"));
}
