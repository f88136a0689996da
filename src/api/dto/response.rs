//! Response DTOs

use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process answers
    pub status: String,

    /// Crate version the server was built from
    pub version: String,
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Number of rows removed
    pub deleted: u64,
}

/// Bulk insert acknowledgement
#[derive(Debug, Serialize)]
pub struct InsertedResponse {
    /// Number of records inserted
    pub inserted: u64,
}
