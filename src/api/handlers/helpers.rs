//! Shared extraction helpers for handlers

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, CatalogResult};

/// Upper bound on accepted request bodies (64MB)
const BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Read and decode a JSON request body
///
/// Bodies are taken raw and decoded here rather than through the `Json`
/// extractor, so malformed payloads come back in the catalog's error shape.
pub async fn parse_json_body<T: DeserializeOwned>(body: Body) -> CatalogResult<T> {
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|e| CatalogError::BadInput(format!("failed to read request body: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| CatalogError::BadInput(format!("invalid JSON body: {}", e)))
}

/// Query extractor that rejects in the catalog's error shape
///
/// Wraps [`Query`] so a malformed query string surfaces as
/// [`CatalogError::BadInput`] instead of axum's plain-text rejection.
pub struct CatalogQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for CatalogQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| CatalogError::BadInput(format!("invalid query string: {}", e)))?;
        Ok(CatalogQuery(value))
    }
}
