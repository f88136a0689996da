// File: src/storage/sqlite/timeseries.rs

use super::convert;
use super::runs::resolve_run;
use super::store::CatalogStore;
use crate::error::{map_constraint, CatalogError, CatalogResult};
use crate::model::datetime::{epoch_seconds_to_string, parse_to_epoch_seconds};
use crate::model::{Interval, NamedPath, PathParts, PeriodType, Timeseries};
use rusqlite::{params, OptionalExtension, Transaction};

impl CatalogStore {
    /// Store a block of timeseries points for one run and path
    ///
    /// The whole block lands or none of it does.
    pub fn put_timeseries(&self, ts: &Timeseries) -> CatalogResult<Timeseries> {
        if ts.values.len() != ts.dates.len() {
            return Err(CatalogError::BadInput(format!(
                "values and dates differ in length: {} vs {}",
                ts.values.len(),
                ts.dates.len()
            )));
        }
        self.with_tx(|tx| insert_series(tx, ts))
    }

    /// Get the points for one run and path, oldest first
    pub fn get_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<Timeseries> {
        self.with_tx(|tx| select_series(tx, scenario, version, path))
    }

    /// Get every timeseries stored for a run
    pub fn get_all_timeseries(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Vec<Timeseries>> {
        self.with_tx(|tx| {
            let run_id = resolve_run(tx, scenario, version)?;
            select_run_series(tx, run_id, scenario, version)
        })
    }

    /// Delete the points for one run and path, returning how many went away
    pub fn delete_timeseries(
        &self,
        scenario: &str,
        version: &str,
        path: &str,
    ) -> CatalogResult<u64> {
        self.with_tx(|tx| delete_series(tx, scenario, version, path))
    }
}

/// Resolve a path string to exactly one named path id
///
/// Matches the normalized path string first, then falls back to treating the
/// argument as a path name.
pub(super) fn resolve_path_flexible(tx: &Transaction, path: &str) -> CatalogResult<i64> {
    if let Ok(normalized) = PathParts::normalize(path) {
        let ids = select_ids(tx, "SELECT id FROM named_paths WHERE path = ?1", &normalized)?;
        if ids.len() == 1 {
            return Ok(ids[0]);
        }
        if ids.len() > 1 {
            return Err(CatalogError::UniqueLookup {
                what: format!("named path '{}'", path),
                matched: ids.len(),
            });
        }
    }

    let ids = select_ids(tx, "SELECT id FROM named_paths WHERE name = ?1", path)?;
    if ids.len() != 1 {
        return Err(CatalogError::UniqueLookup {
            what: format!("named path '{}'", path),
            matched: ids.len(),
        });
    }
    Ok(ids[0])
}

fn select_ids(tx: &Transaction, sql: &str, arg: &str) -> CatalogResult<Vec<i64>> {
    let mut stmt = tx.prepare(sql)?;
    let rows = stmt.query_map(params![arg], |row| row.get(0))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

fn load_path(tx: &Transaction, path_id: i64) -> CatalogResult<NamedPath> {
    tx.query_row(
        "SELECT id, name, path, category, period_type, interval, units, detail
         FROM named_paths WHERE id = ?1",
        params![path_id],
        convert::row_to_named_path,
    )
    .optional()?
    .ok_or_else(|| CatalogError::EmptyLookup(format!("named path id={}", path_id)))
}

/// Insert a block of points within a transaction
///
/// Echoes the stored block back with the catalog's path string and metadata.
pub(super) fn insert_series(tx: &Transaction, ts: &Timeseries) -> CatalogResult<Timeseries> {
    let run_id = resolve_run(tx, &ts.scenario, &ts.version)?;
    let path_id = resolve_path_flexible(tx, &ts.path)?;
    let path = load_path(tx, path_id)?;

    tx.execute(
        "INSERT OR IGNORE INTO common_catalog (run_id, path_id) VALUES (?1, ?2)",
        params![run_id, path_id],
    )?;

    let mut seconds = Vec::with_capacity(ts.dates.len());
    for date in &ts.dates {
        seconds.push(parse_to_epoch_seconds(date)?);
    }

    for (secs, (date, value)) in seconds.iter().zip(ts.dates.iter().zip(ts.values.iter())) {
        tx.execute(
            "INSERT INTO timeseries_ledger (run_id, path_id, datetime, value)
             VALUES (?1, ?2, ?3, ?4)",
            params![run_id, path_id, secs, value],
        )
        .map_err(|e| {
            map_constraint(
                e,
                "timeseries point",
                format!(
                    "scenario={}, version={}, path={}, datetime={}",
                    ts.scenario, ts.version, path.path, date
                ),
            )
        })?;
    }

    let mut dates = Vec::with_capacity(seconds.len());
    for secs in &seconds {
        dates.push(epoch_seconds_to_string(*secs)?);
    }

    Ok(Timeseries {
        scenario: ts.scenario.clone(),
        version: ts.version.clone(),
        path: path.path,
        values: ts.values.clone(),
        dates,
        period_type: path.period_type,
        units: path.units,
        interval: path.interval,
    })
}

fn select_series(
    tx: &Transaction,
    scenario: &str,
    version: &str,
    path: &str,
) -> CatalogResult<Timeseries> {
    let run_id = resolve_run(tx, scenario, version)?;
    let path_id = resolve_path_flexible(tx, path)?;
    let path_row = load_path(tx, path_id)?;

    let mut values = Vec::new();
    let mut dates = Vec::new();
    {
        let mut stmt = tx.prepare(
            "SELECT datetime, value FROM timeseries_ledger
             WHERE run_id = ?1 AND path_id = ?2
             ORDER BY datetime ASC",
        )?;
        let rows = stmt.query_map(params![run_id, path_id], |row| {
            Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?))
        })?;
        for row in rows {
            let (secs, value) = row?;
            dates.push(epoch_seconds_to_string(secs)?);
            values.push(value);
        }
    }

    if values.is_empty() {
        return Err(CatalogError::EmptyLookup(format!(
            "timeseries for scenario={}, version={}, path={}",
            scenario, version, path_row.path
        )));
    }

    Ok(Timeseries {
        scenario: scenario.to_string(),
        version: version.to_string(),
        path: path_row.path,
        values,
        dates,
        period_type: path_row.period_type,
        units: path_row.units,
        interval: path_row.interval,
    })
}

/// Select every series for a run in one pass, grouped by path
pub(super) fn select_run_series(
    tx: &Transaction,
    run_id: i64,
    scenario: &str,
    version: &str,
) -> CatalogResult<Vec<Timeseries>> {
    let mut stmt = tx.prepare(
        "SELECT l.path_id, l.datetime, l.value, p.path, p.period_type, p.units, p.interval
         FROM timeseries_ledger l
         JOIN named_paths p ON p.id = l.path_id
         WHERE l.run_id = ?1
         ORDER BY l.path_id, l.datetime",
    )?;
    let rows = stmt.query_map(params![run_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut found: Vec<Timeseries> = Vec::new();
    let mut current_path: Option<i64> = None;

    for row in rows {
        let (path_id, secs, value, path, period_type, units, interval) = row?;
        if current_path != Some(path_id) {
            found.push(Timeseries {
                scenario: scenario.to_string(),
                version: version.to_string(),
                path,
                values: Vec::new(),
                dates: Vec::new(),
                period_type: PeriodType::parse(&period_type).ok_or_else(|| {
                    CatalogError::Internal(format!("stored period type '{}'", period_type))
                })?,
                units,
                interval: Interval::parse(&interval).ok_or_else(|| {
                    CatalogError::Internal(format!("stored interval '{}'", interval))
                })?,
            });
            current_path = Some(path_id);
        }
        let series = found
            .last_mut()
            .ok_or_else(|| CatalogError::Internal("series grouping lost its tail".into()))?;
        series.values.push(value);
        series.dates.push(epoch_seconds_to_string(secs)?);
    }

    Ok(found)
}

fn delete_series(
    tx: &Transaction,
    scenario: &str,
    version: &str,
    path: &str,
) -> CatalogResult<u64> {
    let run_id = resolve_run(tx, scenario, version)?;
    let path_id = resolve_path_flexible(tx, path)?;

    let deleted = tx.execute(
        "DELETE FROM timeseries_ledger WHERE run_id = ?1 AND path_id = ?2",
        params![run_id, path_id],
    )?;
    if deleted == 0 {
        return Err(CatalogError::EmptyLookup(format!(
            "timeseries for scenario={}, version={}, path={}",
            scenario, version, path
        )));
    }
    Ok(deleted as u64)
}
