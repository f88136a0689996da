// File: src/storage/sqlite/paths.rs

use super::convert;
use super::store::CatalogStore;
use crate::error::{map_constraint, CatalogError, CatalogResult};
use crate::model::{
    Interval, NamedPath, NewNamedPath, PathCategory, PathFilter, PathParts, PathUpdate, PeriodType,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Transaction};

/// Well-known paths shipped with the catalog
const STANDARD_PATHS_JSON: &str = include_str!("standard_paths.json");

impl CatalogStore {
    /// Create a named path
    pub fn put_path(&self, new: &NewNamedPath) -> CatalogResult<NamedPath> {
        self.with_tx(|tx| insert_path(tx, new))
    }

    /// Get named paths matching the filter
    pub fn get_paths(&self, filter: &PathFilter) -> CatalogResult<Vec<NamedPath>> {
        let found = self.with_tx(|tx| select_paths(tx, filter))?;
        if found.is_empty() {
            return Err(CatalogError::EmptyLookup("paths".into()));
        }
        Ok(found)
    }

    /// Get the paths that carry data for a run
    pub fn get_paths_in_run(&self, run_id: i64) -> CatalogResult<Vec<NamedPath>> {
        self.with_tx(|tx| select_paths_for_run(tx, run_id))
    }

    /// Update a named path in place
    pub fn update_path(&self, id: i64, update: &PathUpdate) -> CatalogResult<NamedPath> {
        self.with_tx(|tx| update_path_row(tx, id, update))
    }

    /// Delete a named path; fails while data still hangs off it
    pub fn delete_path(&self, id: i64) -> CatalogResult<()> {
        self.with_tx(|tx| delete_path_row(tx, id))
    }

    /// Seed the catalog with the built-in well-known paths
    ///
    /// Paths already present are skipped. Returns the number inserted.
    pub fn put_standard_paths(&self) -> CatalogResult<u64> {
        let entries: Vec<NewNamedPath> = serde_json::from_str(STANDARD_PATHS_JSON)
            .map_err(|e| CatalogError::Internal(format!("standard paths document: {}", e)))?;

        let mut inserted = 0u64;
        for entry in &entries {
            match self.with_tx(|tx| insert_path(tx, entry)) {
                Ok(_) => inserted += 1,
                Err(CatalogError::Duplicate { .. }) => {
                    tracing::warn!(name = %entry.name, "standard path already present, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(inserted)
    }
}

fn parse_category(s: &str) -> CatalogResult<PathCategory> {
    PathCategory::parse(s).ok_or_else(|| CatalogError::BadInput(format!("unknown category '{}'", s)))
}

fn parse_period_type(s: &str) -> CatalogResult<PeriodType> {
    PeriodType::parse(s).ok_or_else(|| CatalogError::BadInput(format!("unknown period type '{}'", s)))
}

fn parse_interval(s: &str) -> CatalogResult<Interval> {
    Interval::parse(s).ok_or_else(|| CatalogError::BadInput(format!("unknown interval '{}'", s)))
}

/// Insert a single named path within a transaction
pub(super) fn insert_path(tx: &Transaction, new: &NewNamedPath) -> CatalogResult<NamedPath> {
    let category = parse_category(&new.category)?;
    let period_type = parse_period_type(&new.period_type)?;
    let interval = parse_interval(&new.interval)?;
    let path = PathParts::normalize(&new.path)?;

    let existing: i64 = tx.query_row(
        "SELECT COUNT(*) FROM named_paths WHERE name = ?1 AND category = ?2",
        params![new.name, category.as_str()],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Err(CatalogError::Duplicate {
            what: "named path".into(),
            fields: format!("name={}, category={}", new.name, category.as_str()),
        });
    }

    tx.execute(
        "INSERT INTO named_paths (name, path, category, period_type, interval, units, detail)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.name,
            path,
            category.as_str(),
            period_type.as_str(),
            interval.as_str(),
            new.units,
            new.detail,
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            "named path",
            format!("name={}, category={}", new.name, category.as_str()),
        )
    })?;

    Ok(NamedPath {
        id: Some(tx.last_insert_rowid()),
        name: new.name.clone(),
        path,
        category,
        period_type,
        interval,
        units: new.units.clone(),
        detail: new.detail.clone(),
    })
}

/// Select named paths matching the filter (empty result is not an error here)
pub(super) fn select_paths(tx: &Transaction, filter: &PathFilter) -> CatalogResult<Vec<NamedPath>> {
    let mut sql = String::from(
        "SELECT id, name, path, category, period_type, interval, units, detail FROM named_paths",
    );
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(name) = &filter.name {
        clauses.push("name = ?");
        values.push(Value::from(name.clone()));
    }
    if let Some(path) = &filter.path {
        clauses.push("path = ?");
        values.push(Value::from(PathParts::normalize(path)?));
    }
    if let Some(category) = &filter.category {
        clauses.push("category = ?");
        values.push(Value::from(category.clone()));
    }
    if let Some(id) = filter.id {
        clauses.push("id = ?");
        values.push(Value::from(id));
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = tx.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), convert::row_to_named_path)?;

    let mut found = Vec::new();
    for row in rows {
        found.push(row?);
    }
    Ok(found)
}

/// Select the paths cataloged for a run
pub(super) fn select_paths_for_run(tx: &Transaction, run_id: i64) -> CatalogResult<Vec<NamedPath>> {
    let mut stmt = tx.prepare(
        "SELECT p.id, p.name, p.path, p.category, p.period_type, p.interval, p.units, p.detail
         FROM named_paths p
         JOIN common_catalog cc ON cc.path_id = p.id
         WHERE cc.run_id = ?1
         ORDER BY p.id",
    )?;
    let rows = stmt.query_map(params![run_id], convert::row_to_named_path)?;

    let mut found = Vec::new();
    for row in rows {
        found.push(row?);
    }
    Ok(found)
}

fn update_path_row(tx: &Transaction, id: i64, update: &PathUpdate) -> CatalogResult<NamedPath> {
    let current = tx
        .query_row(
            "SELECT id, name, path, category, period_type, interval, units, detail
             FROM named_paths WHERE id = ?1",
            params![id],
            convert::row_to_named_path,
        )
        .optional()?
        .ok_or_else(|| CatalogError::EmptyLookup(format!("named path id={}", id)))?;

    let name = update.name.clone().unwrap_or(current.name);
    let path = match &update.path {
        Some(path) => PathParts::normalize(path)?,
        None => current.path,
    };
    let category = match &update.category {
        Some(category) => parse_category(category)?,
        None => current.category,
    };
    let period_type = match &update.period_type {
        Some(period_type) => parse_period_type(period_type)?,
        None => current.period_type,
    };
    let interval = match &update.interval {
        Some(interval) => parse_interval(interval)?,
        None => current.interval,
    };
    let units = update.units.clone().unwrap_or(current.units);
    let detail = update.detail.clone().unwrap_or(current.detail);

    tx.execute(
        "UPDATE named_paths SET name = ?1, path = ?2, category = ?3, period_type = ?4,
                interval = ?5, units = ?6, detail = ?7
         WHERE id = ?8",
        params![
            name,
            path,
            category.as_str(),
            period_type.as_str(),
            interval.as_str(),
            units,
            detail,
            id,
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            "named path",
            format!("name={}, category={}", name, category.as_str()),
        )
    })?;

    Ok(NamedPath {
        id: Some(id),
        name,
        path,
        category,
        period_type,
        interval,
        units,
        detail,
    })
}

fn delete_path_row(tx: &Transaction, id: i64) -> CatalogResult<()> {
    let cataloged: i64 = tx.query_row(
        "SELECT COUNT(*) FROM common_catalog WHERE path_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if cataloged > 0 {
        return Err(CatalogError::Referential(format!(
            "named path id={} carries data for {} run(s)",
            id, cataloged
        )));
    }

    let metric_refs: i64 = tx.query_row(
        "SELECT COUNT(*) FROM metric_values WHERE path_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if metric_refs > 0 {
        return Err(CatalogError::Referential(format!(
            "named path id={} is referenced by {} metric value(s)",
            id, metric_refs
        )));
    }

    let deleted = tx.execute("DELETE FROM named_paths WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(CatalogError::EmptyLookup(format!("named path id={}", id)));
    }
    Ok(())
}
