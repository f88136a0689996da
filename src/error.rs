//! Catalog error types

use axum::http::StatusCode;
use thiserror::Error;

/// Main catalog error type
///
/// Every fallible operation in the crate returns one of these variants.
/// The HTTP layer maps them to status codes via [`CatalogError::status_code`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input failed validation before touching the database
    #[error("invalid input: {0}")]
    BadInput(String),

    /// Write collided with a uniqueness rule
    #[error("duplicate {what}: {fields}")]
    Duplicate { what: String, fields: String },

    /// A read matched no records
    #[error("no {0} found")]
    EmptyLookup(String),

    /// A lookup that must resolve to exactly one record did not
    #[error("{what}: expected exactly one match, found {matched}")]
    UniqueLookup { what: String, matched: usize },

    /// Operation references a missing entity, or the entity is still referenced
    #[error("reference error: {0}")]
    Referential(String),

    /// External timeseries container failed
    #[error("container error: {0}")]
    External(String),

    /// HTTP transport failure in the remote client
    #[error("network error: {0}")]
    Network(String),

    /// Error relayed from a remote catalog response body
    #[error("remote catalog error: {detail}")]
    Remote { status: u16, detail: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// SQLite database error
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Catalog result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request (an ambiguous unique lookup is a caller problem)
            CatalogError::BadInput(_) => StatusCode::BAD_REQUEST,
            CatalogError::UniqueLookup { matched, .. } if *matched > 0 => StatusCode::BAD_REQUEST,

            // 404 Not Found
            CatalogError::EmptyLookup(_)
            | CatalogError::UniqueLookup { .. }
            | CatalogError::Referential(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            CatalogError::Duplicate { .. } => StatusCode::CONFLICT,

            // Relayed errors keep the upstream status
            CatalogError::Remote { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }

            // 500 Internal Server Error
            CatalogError::External(_)
            | CatalogError::Network(_)
            | CatalogError::Config(_)
            | CatalogError::Internal(_)
            | CatalogError::Sqlite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if the error is recoverable (client can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::Network(_))
    }

    /// Reconstruct an error from a remote response status and detail body
    pub(crate) fn from_status(status: StatusCode, detail: String) -> Self {
        CatalogError::Remote {
            status: status.as_u16(),
            detail,
        }
    }
}

// Conversions from external errors

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::BadInput(format!("invalid JSON: {}", e))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CatalogError::Network(format!("request timed out: {}", e))
        } else if e.is_connect() {
            CatalogError::Network(format!("connection failed: {}", e))
        } else {
            CatalogError::Network(e.to_string())
        }
    }
}

/// Translate SQLite constraint failures into the catalog taxonomy
///
/// Used where an insert relies on a declared UNIQUE or FOREIGN KEY constraint
/// instead of an explicit pre-check.
pub(crate) fn map_constraint(e: rusqlite::Error, what: &str, fields: String) -> CatalogError {
    match &e {
        rusqlite::Error::SqliteFailure(err, msg)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            let text = msg.clone().unwrap_or_default();
            if text.contains("FOREIGN KEY") {
                CatalogError::Referential(format!("{} refers to a missing record", what))
            } else {
                CatalogError::Duplicate {
                    what: what.to_string(),
                    fields,
                }
            }
        }
        _ => CatalogError::Sqlite(e),
    }
}
