//! Ledger datetime conversion
//!
//! The ledger stores datetimes as 64-bit float seconds since
//! 1900-01-01T00:00:00 UTC. The wire format is ISO 8601: RFC 3339 with a
//! `Z` suffix on the way out, RFC 3339 or a naive `YYYY-MM-DDTHH:MM:SS`
//! (read as UTC) on the way in.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{CatalogError, CatalogResult};

fn epoch() -> DateTime<Utc> {
    // Infallible for the fixed 1900-01-01 00:00:00 arguments.
    let naive = NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}

/// Parse an ISO 8601 datetime string
pub fn parse_datetime(s: &str) -> CatalogResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(CatalogError::BadInput(format!("invalid datetime: {}", s)))
}

/// Format a datetime as RFC 3339 with second precision and a Z suffix
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Seconds since the 1900 epoch, as stored in the ledger
pub fn to_epoch_seconds(dt: &DateTime<Utc>) -> f64 {
    dt.signed_duration_since(epoch()).num_seconds() as f64
}

/// Recover a datetime from stored epoch seconds
pub fn from_epoch_seconds(secs: f64) -> CatalogResult<DateTime<Utc>> {
    if !secs.is_finite() {
        return Err(CatalogError::Internal(format!(
            "non-finite ledger datetime: {}",
            secs
        )));
    }
    epoch()
        .checked_add_signed(Duration::seconds(secs as i64))
        .ok_or_else(|| CatalogError::Internal(format!("ledger datetime out of range: {}", secs)))
}

/// Parse a wire datetime straight to ledger epoch seconds
pub fn parse_to_epoch_seconds(s: &str) -> CatalogResult<f64> {
    Ok(to_epoch_seconds(&parse_datetime(s)?))
}

/// Render ledger epoch seconds as a wire datetime string
pub fn epoch_seconds_to_string(secs: f64) -> CatalogResult<String> {
    Ok(format_datetime(&from_epoch_seconds(secs)?))
}
