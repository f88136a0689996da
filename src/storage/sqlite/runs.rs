// File: src/storage/sqlite/runs.rs

use super::convert;
use super::scenarios::{resolve_scenario, set_preferred};
use super::store::CatalogStore;
use crate::error::{map_constraint, CatalogError, CatalogResult};
use crate::model::{NewRun, Run, RunFilter, RunUpdate};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Transaction};

/// Raw run columns joined with the run's history row
pub(super) struct RunRow {
    pub id: i64,
    pub scenario_id: i64,
    pub parent_id: Option<i64>,
    pub contact: String,
    pub confidential: bool,
    pub published: bool,
    pub code_version: String,
    pub detail: String,
    pub version: String,
}

impl CatalogStore {
    /// Create a run, record its version, and optionally prefer it
    pub fn put_run(&self, new: &NewRun) -> CatalogResult<Run> {
        self.with_tx(|tx| insert_run(tx, new))
    }

    /// Get runs matching the filter
    pub fn get_runs(&self, filter: &RunFilter) -> CatalogResult<Vec<Run>> {
        let found = self.with_tx(|tx| select_runs(tx, filter))?;
        if found.is_empty() {
            return Err(CatalogError::EmptyLookup("runs".into()));
        }
        Ok(found)
    }

    /// Update a run in place
    pub fn update_run(&self, id: i64, update: &RunUpdate) -> CatalogResult<Run> {
        self.with_tx(|tx| update_run_row(tx, id, update))
    }

    /// Delete a run and everything hanging off it
    pub fn delete_run(&self, id: i64) -> CatalogResult<()> {
        self.with_tx(|tx| delete_run_rows(tx, id))
    }
}

/// Resolve (scenario name, version) to exactly one run id
pub(super) fn resolve_run(tx: &Transaction, scenario: &str, version: &str) -> CatalogResult<i64> {
    let scenario_id = resolve_scenario(tx, scenario)?;

    let mut stmt =
        tx.prepare("SELECT run_id FROM run_history WHERE scenario_id = ?1 AND version = ?2")?;
    let rows = stmt.query_map(params![scenario_id, version], |row| row.get(0))?;

    let mut run_ids: Vec<i64> = Vec::new();
    for row in rows {
        run_ids.push(row?);
    }
    if run_ids.len() != 1 {
        return Err(CatalogError::UniqueLookup {
            what: format!("run scenario={}, version={}", scenario, version),
            matched: run_ids.len(),
        });
    }
    Ok(run_ids[0])
}

/// Insert a run plus its history row within a transaction
pub(super) fn insert_run(tx: &Transaction, new: &NewRun) -> CatalogResult<Run> {
    let scenario_id = resolve_scenario(tx, &new.scenario)?;

    let existing: i64 = tx.query_row(
        "SELECT COUNT(*) FROM run_history WHERE scenario_id = ?1 AND version = ?2",
        params![scenario_id, new.version],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Err(CatalogError::Duplicate {
            what: "run".into(),
            fields: format!("scenario={}, version={}", new.scenario, new.version),
        });
    }

    let parent_id = match &new.parent {
        Some(parent_version) => Some(resolve_run(tx, &new.scenario, parent_version)?),
        None => None,
    };

    tx.execute(
        "INSERT INTO runs (scenario_id, parent_id, contact, confidential, published, code_version, detail)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            scenario_id,
            parent_id,
            new.contact,
            new.confidential,
            new.published,
            new.code_version,
            new.detail,
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            "run",
            format!("scenario={}, version={}", new.scenario, new.version),
        )
    })?;
    let run_id = tx.last_insert_rowid();

    tx.execute(
        "INSERT INTO run_history (run_id, scenario_id, version) VALUES (?1, ?2, ?3)",
        params![run_id, scenario_id, new.version],
    )
    .map_err(|e| {
        map_constraint(
            e,
            "run",
            format!("scenario={}, version={}", new.scenario, new.version),
        )
    })?;

    if new.prefer_this_version {
        set_preferred(tx, scenario_id, run_id)?;
    }

    load_run(tx, run_id)
}

/// Materialize a full run record with scenario name and lineage versions
pub(super) fn load_run(tx: &Transaction, run_id: i64) -> CatalogResult<Run> {
    let row = tx
        .query_row(
            "SELECT r.id, r.scenario_id, r.parent_id, r.contact, r.confidential, r.published,
                    r.code_version, r.detail, rh.version
             FROM runs r
             JOIN run_history rh ON rh.run_id = r.id
             WHERE r.id = ?1",
            params![run_id],
            convert::row_to_run_row,
        )
        .optional()?
        .ok_or_else(|| CatalogError::EmptyLookup(format!("run id={}", run_id)))?;

    let scenario: String = tx.query_row(
        "SELECT name FROM scenarios WHERE id = ?1",
        params![row.scenario_id],
        |r| r.get(0),
    )?;

    let parent: Option<String> = match row.parent_id {
        Some(parent_id) => tx
            .query_row(
                "SELECT version FROM run_history WHERE run_id = ?1",
                params![parent_id],
                |r| r.get(0),
            )
            .optional()?,
        None => None,
    };

    let mut children = Vec::new();
    {
        let mut stmt = tx.prepare(
            "SELECT rh.version
             FROM runs c
             JOIN run_history rh ON rh.run_id = c.id
             WHERE c.parent_id = ?1
             ORDER BY c.id",
        )?;
        let rows = stmt.query_map(params![run_id], |r| r.get(0))?;
        for child in rows {
            children.push(child?);
        }
    }

    Ok(Run {
        id: Some(row.id),
        scenario,
        version: row.version,
        contact: row.contact,
        code_version: row.code_version,
        detail: row.detail,
        parent,
        children,
        confidential: row.confidential,
        published: row.published,
    })
}

/// Select runs matching the filter (empty result is not an error here)
///
/// The version filter is applied against the materialized records because
/// version lives in run_history, not on the runs row.
pub(super) fn select_runs(tx: &Transaction, filter: &RunFilter) -> CatalogResult<Vec<Run>> {
    let mut sql =
        String::from("SELECT r.id FROM runs r JOIN scenarios s ON s.id = r.scenario_id");
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(scenario) = &filter.scenario {
        clauses.push("s.name = ?");
        values.push(Value::from(scenario.clone()));
    }
    if let Some(code_version) = &filter.code_version {
        clauses.push("r.code_version = ?");
        values.push(Value::from(code_version.clone()));
    }
    if let Some(contact) = &filter.contact {
        clauses.push("r.contact = ?");
        values.push(Value::from(contact.clone()));
    }
    if let Some(id) = filter.id {
        clauses.push("r.id = ?");
        values.push(Value::from(id));
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY r.id");

    let mut ids: Vec<i64> = Vec::new();
    {
        let mut stmt = tx.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), |row| row.get(0))?;
        for row in rows {
            ids.push(row?);
        }
    }

    let mut found = Vec::new();
    for id in ids {
        found.push(load_run(tx, id)?);
    }
    if let Some(version) = &filter.version {
        found.retain(|run| &run.version == version);
    }
    Ok(found)
}

fn update_run_row(tx: &Transaction, id: i64, update: &RunUpdate) -> CatalogResult<Run> {
    let current = tx
        .query_row(
            "SELECT r.id, r.scenario_id, r.parent_id, r.contact, r.confidential, r.published,
                    r.code_version, r.detail, rh.version
             FROM runs r
             JOIN run_history rh ON rh.run_id = r.id
             WHERE r.id = ?1",
            params![id],
            convert::row_to_run_row,
        )
        .optional()?
        .ok_or_else(|| CatalogError::EmptyLookup(format!("run id={}", id)))?;

    if let Some(version) = &update.version {
        if version != &current.version {
            let taken: i64 = tx.query_row(
                "SELECT COUNT(*) FROM run_history WHERE scenario_id = ?1 AND version = ?2",
                params![current.scenario_id, version],
                |row| row.get(0),
            )?;
            if taken > 0 {
                return Err(CatalogError::Duplicate {
                    what: "run".into(),
                    fields: format!("version={}", version),
                });
            }
            tx.execute(
                "UPDATE run_history SET version = ?1 WHERE run_id = ?2",
                params![version, id],
            )?;
        }
    }

    let contact = update.contact.clone().unwrap_or(current.contact);
    let confidential = update.confidential.unwrap_or(current.confidential);
    let published = update.published.unwrap_or(current.published);
    let code_version = update.code_version.clone().unwrap_or(current.code_version);
    let detail = update.detail.clone().unwrap_or(current.detail);

    tx.execute(
        "UPDATE runs SET contact = ?1, confidential = ?2, published = ?3, code_version = ?4, detail = ?5
         WHERE id = ?6",
        params![contact, confidential, published, code_version, detail, id],
    )?;

    load_run(tx, id)
}

fn delete_run_rows(tx: &Transaction, id: i64) -> CatalogResult<()> {
    let existing: i64 = tx.query_row(
        "SELECT COUNT(*) FROM runs WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if existing == 0 {
        return Err(CatalogError::EmptyLookup(format!("run id={}", id)));
    }

    // Children keep existing; their parent_id clears via ON DELETE SET NULL
    tx.execute("DELETE FROM timeseries_ledger WHERE run_id = ?1", params![id])?;
    tx.execute("DELETE FROM common_catalog WHERE run_id = ?1", params![id])?;
    tx.execute("DELETE FROM metric_values WHERE run_id = ?1", params![id])?;
    tx.execute("DELETE FROM preferred_versions WHERE run_id = ?1", params![id])?;
    tx.execute("DELETE FROM run_history WHERE run_id = ?1", params![id])?;
    tx.execute("DELETE FROM runs WHERE id = ?1", params![id])?;
    Ok(())
}
