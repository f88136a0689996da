//! Tests for the /timeseries endpoints

use crate::common::*;

#[tokio::test]
async fn test_put_timeseries_echoes_block() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;
    let json = assert_ok_json(response).await;

    assert_eq!(json["scenario"], "Baseline");
    assert_eq!(json["version"], "2024-01");
    assert_eq!(json["path"], "/CALSIM/S_SHSTA/STORAGE//1MON/L2020A/");
    assert_eq!(json["values"], serde_json::json!([4100.0, 4075.5, 4052.25, 4210.0]));
    assert_eq!(
        json["dates"],
        serde_json::json!([
            "1921-10-01T00:00:00Z",
            "1921-11-01T00:00:00Z",
            "1921-12-01T00:00:00Z",
            "1922-01-01T00:00:00Z"
        ])
    );
}

#[tokio::test]
async fn test_put_timeseries_catalog_metadata_wins() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut block = shasta_block("Baseline", "2024-01");
    block["units"] = serde_json::json!("CFS");
    block["period_type"] = serde_json::json!("INST-VAL");
    let response = send_json(&app, "PUT", "/timeseries", &block).await;
    let json = assert_ok_json(response).await;

    // The named path's metadata is authoritative
    assert_eq!(json["units"], "TAF");
    assert_eq!(json["period_type"], "PER-AVER");
}

#[tokio::test]
async fn test_put_timeseries_length_mismatch_is_400() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut block = shasta_block("Baseline", "2024-01");
    block["dates"] = serde_json::json!(["1921-10-01T00:00:00"]);
    let response = send_json(&app, "PUT", "/timeseries", &block).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("differ in length: 4 vs 1"));
}

#[tokio::test]
async fn test_put_timeseries_bad_date_is_400() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut block = shasta_block("Baseline", "2024-01");
    block["dates"] = serde_json::json!([
        "1921-10-01T00:00:00",
        "October 1921",
        "1921-12-01T00:00:00",
        "1922-01-01T00:00:00"
    ]);
    let response = send_json(&app, "PUT", "/timeseries", &block).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("invalid datetime"));
}

#[tokio::test]
async fn test_put_timeseries_unknown_run_is_404() {
    let app = test_app();
    seed_baseline(&app).await;

    let response = send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2030-01")).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("version=2030-01"));
}

#[tokio::test]
async fn test_put_timeseries_unknown_path_is_404() {
    let app = test_app();
    seed_baseline(&app).await;

    let mut block = shasta_block("Baseline", "2024-01");
    block["path"] = serde_json::json!("/CALSIM/S_FOLSM/STORAGE//1MON/L2020A/");
    let response = send_json(&app, "PUT", "/timeseries", &block).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("found 0"));
}

#[tokio::test]
async fn test_put_timeseries_repeated_datetime_conflicts() {
    let app = test_app();
    seed_baseline(&app).await;

    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;
    let response = send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;
    let detail = assert_error_detail(response, StatusCode::CONFLICT).await;
    assert!(detail.contains("timeseries point"));
}

#[tokio::test]
async fn test_get_timeseries_by_name_and_by_path() {
    let app = test_app();
    seed_baseline(&app).await;
    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;

    let by_name = "/timeseries?scenario=Baseline&version=2024-01&path=shasta_storage";
    let response = send(&app, "GET", by_name).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["values"].as_array().unwrap().len(), 4);

    let by_path =
        "/timeseries?scenario=Baseline&version=2024-01&path=/CALSIM/S_SHSTA/STORAGE//1MON/L2020A/";
    let response = send(&app, "GET", by_path).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["path"], "/CALSIM/S_SHSTA/STORAGE//1MON/L2020A/");
}

#[tokio::test]
async fn test_get_timeseries_missing_block_is_404() {
    let app = test_app();
    seed_baseline(&app).await;

    let uri = "/timeseries?scenario=Baseline&version=2024-01&path=shasta_storage";
    let response = send(&app, "GET", uri).await;
    let detail = assert_error_detail(response, StatusCode::NOT_FOUND).await;
    assert!(detail.contains("scenario=Baseline"));
    assert!(detail.contains("version=2024-01"));
}

#[tokio::test]
async fn test_get_timeseries_ambiguous_name_is_400() {
    let app = test_app();
    seed_baseline(&app).await;

    // Same display name registered under a second category
    let mut twin = shasta_path();
    twin["category"] = serde_json::json!("other");
    twin["path"] = serde_json::json!("/CALSIM/S_SHSTA/STORAGE-ALT//1MON/L2020A/");
    send_json(&app, "PUT", "/paths", &twin).await;

    let uri = "/timeseries?scenario=Baseline&version=2024-01&path=shasta_storage";
    let response = send(&app, "GET", uri).await;
    let detail = assert_error_detail(response, StatusCode::BAD_REQUEST).await;
    assert!(detail.contains("found 2"));
}

#[tokio::test]
async fn test_get_all_timeseries_groups_blocks() {
    let app = test_app();
    seed_baseline(&app).await;

    let folsom = serde_json::json!({
        "name": "folsom_storage",
        "path": "/CALSIM/S_FOLSM/STORAGE//1MON/L2020A/",
        "category": "storage",
        "period_type": "PER-AVER",
        "interval": "1MON",
        "units": "TAF",
        "detail": "Folsom reservoir end-of-month storage"
    });
    send_json(&app, "PUT", "/paths", &folsom).await;

    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;
    let mut block = shasta_block("Baseline", "2024-01");
    block["path"] = serde_json::json!("/CALSIM/S_FOLSM/STORAGE//1MON/L2020A/");
    block["values"] = serde_json::json!([950.0, 940.0, 930.0, 975.0]);
    send_json(&app, "PUT", "/timeseries", &block).await;

    let response = send(&app, "GET", "/timeseries/all?scenario=Baseline&version=2024-01").await;
    let json = assert_ok_json(response).await;
    let list = json.as_array().expect("Body should be a list");
    assert_eq!(list.len(), 2);
    for block in list {
        assert_eq!(block["values"].as_array().unwrap().len(), 4);
    }
}

#[tokio::test]
async fn test_delete_timeseries_reports_row_count() {
    let app = test_app();
    seed_baseline(&app).await;
    send_json(&app, "PUT", "/timeseries", &shasta_block("Baseline", "2024-01")).await;

    let uri = "/timeseries?scenario=Baseline&version=2024-01&path=shasta_storage";
    let response = send(&app, "DELETE", uri).await;
    let json = assert_ok_json(response).await;
    assert_eq!(json["deleted"], 4);

    let response = send(&app, "GET", uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
