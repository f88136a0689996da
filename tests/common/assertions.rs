//! Custom assertions for API responses

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

/// Read a response body as JSON
pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}

/// Assert OK and return the JSON body
pub async fn assert_ok_json(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

/// Assert a status and the single-key error shape, returning the detail text
pub async fn assert_error_detail(response: Response, expected: StatusCode) -> String {
    assert_eq!(response.status(), expected);
    let json = read_json(response).await;
    let object = json.as_object().expect("Error body should be a JSON object");
    assert_eq!(object.len(), 1, "Error body should carry only 'detail'");
    object
        .get("detail")
        .and_then(Value::as_str)
        .expect("'detail' should be a string")
        .to_string()
}
