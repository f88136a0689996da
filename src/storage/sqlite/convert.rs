// File: src/storage/sqlite/convert.rs

use super::runs::RunRow;
use crate::model::{Assumption, Interval, Metric, MetricValue, NamedPath, PathCategory, PeriodType};
use rusqlite::Row;

/// Convert a database row to Assumption
///
/// Column order: id, name, kind, detail.
pub(super) fn row_to_assumption(row: &Row) -> rusqlite::Result<Assumption> {
    Ok(Assumption {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        kind: row.get(2)?,
        detail: row.get(3)?,
    })
}

/// Convert a database row to NamedPath
///
/// Column order: id, name, path, category, period_type, interval, units, detail.
pub(super) fn row_to_named_path(row: &Row) -> rusqlite::Result<NamedPath> {
    let category: String = row.get(3)?;
    let period_type: String = row.get(4)?;
    let interval: String = row.get(5)?;

    Ok(NamedPath {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        path: row.get(2)?,
        category: PathCategory::parse(&category).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(3, "category".into(), rusqlite::types::Type::Text)
        })?,
        period_type: PeriodType::parse(&period_type).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(4, "period_type".into(), rusqlite::types::Type::Text)
        })?,
        interval: Interval::parse(&interval).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(5, "interval".into(), rusqlite::types::Type::Text)
        })?,
        units: row.get(6)?,
        detail: row.get(7)?,
    })
}

/// Convert a database row to RunRow (joined with run_history for version)
///
/// Column order: id, scenario_id, parent_id, contact, confidential, published,
/// code_version, detail, version.
pub(super) fn row_to_run_row(row: &Row) -> rusqlite::Result<RunRow> {
    Ok(RunRow {
        id: row.get(0)?,
        scenario_id: row.get(1)?,
        parent_id: row.get(2)?,
        contact: row.get(3)?,
        confidential: row.get(4)?,
        published: row.get(5)?,
        code_version: row.get(6)?,
        detail: row.get(7)?,
        version: row.get(8)?,
    })
}

/// Convert a database row to Metric
///
/// Column order: id, name, index_detail, detail.
pub(super) fn row_to_metric(row: &Row) -> rusqlite::Result<Metric> {
    Ok(Metric {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        index_detail: row.get(2)?,
        detail: row.get(3)?,
    })
}

/// Convert a database row to MetricValue
///
/// Column order: path_id, run_id, metric_id, idx, units, value.
pub(super) fn row_to_metric_value(row: &Row) -> rusqlite::Result<MetricValue> {
    Ok(MetricValue {
        path_id: row.get(0)?,
        run_id: row.get(1)?,
        metric_id: row.get(2)?,
        idx: row.get(3)?,
        units: row.get(4)?,
        value: row.get(5)?,
    })
}
