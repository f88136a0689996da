// File: src/storage/sqlite/scenarios.rs

use super::store::CatalogStore;
use crate::error::{map_constraint, CatalogError, CatalogResult};
use crate::model::{NewScenario, Scenario, ScenarioFilter};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Transaction};
use std::collections::BTreeMap;

impl CatalogStore {
    /// Create a scenario with its assumption map
    pub fn put_scenario(&self, new: &NewScenario) -> CatalogResult<Scenario> {
        self.with_tx(|tx| insert_scenario(tx, new))
    }

    /// Get scenarios matching the filter
    pub fn get_scenarios(&self, filter: &ScenarioFilter) -> CatalogResult<Vec<Scenario>> {
        let found = self.with_tx(|tx| select_scenarios(tx, filter))?;
        if found.is_empty() {
            return Err(CatalogError::EmptyLookup("scenarios".into()));
        }
        Ok(found)
    }

    /// Point a scenario's preferred version at an existing run version
    pub fn update_scenario_version(
        &self,
        scenario: &str,
        version: &str,
    ) -> CatalogResult<Scenario> {
        self.with_tx(|tx| update_version(tx, scenario, version))
    }
}

/// Resolve a scenario name to its id
pub(super) fn resolve_scenario(tx: &Transaction, name: &str) -> CatalogResult<i64> {
    tx.query_row(
        "SELECT id FROM scenarios WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| CatalogError::Referential(format!("scenario '{}' not found", name)))
}

/// Upsert the preferred run for a scenario
///
/// The run must belong to the scenario; every caller resolves run ids
/// within the scenario already, so a mismatch means a bad id was handed in.
pub(super) fn set_preferred(tx: &Transaction, scenario_id: i64, run_id: i64) -> CatalogResult<()> {
    let owner: Option<i64> = tx
        .query_row(
            "SELECT scenario_id FROM runs WHERE id = ?1",
            params![run_id],
            |row| row.get(0),
        )
        .optional()?;
    match owner {
        Some(id) if id == scenario_id => {}
        Some(_) => {
            return Err(CatalogError::Referential(format!(
                "run id={} does not belong to scenario id={}",
                run_id, scenario_id
            )))
        }
        None => {
            return Err(CatalogError::Referential(format!(
                "run id={} not found",
                run_id
            )))
        }
    }

    tx.execute(
        "INSERT INTO preferred_versions (scenario_id, run_id) VALUES (?1, ?2)
         ON CONFLICT(scenario_id) DO UPDATE SET run_id = excluded.run_id",
        params![scenario_id, run_id],
    )?;
    Ok(())
}

/// Insert a scenario and its assumption bindings within a transaction
pub(super) fn insert_scenario(tx: &Transaction, new: &NewScenario) -> CatalogResult<Scenario> {
    let existing: i64 = tx.query_row(
        "SELECT COUNT(*) FROM scenarios WHERE name = ?1",
        params![new.name],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Err(CatalogError::Duplicate {
            what: "scenario".into(),
            fields: format!("name={}", new.name),
        });
    }

    tx.execute(
        "INSERT INTO scenarios (name) VALUES (?1)",
        params![new.name],
    )
    .map_err(|e| map_constraint(e, "scenario", format!("name={}", new.name)))?;
    let scenario_id = tx.last_insert_rowid();

    for (kind, assumption_name) in &new.assumptions {
        let assumption_id = lookup_assumption(tx, kind, assumption_name)?;
        tx.execute(
            "INSERT INTO scenario_assumptions (scenario_id, assumption_kind, assumption_id)
             VALUES (?1, ?2, ?3)",
            params![scenario_id, kind, assumption_id],
        )
        .map_err(|e| {
            map_constraint(
                e,
                "scenario assumption",
                format!("scenario={}, kind={}", new.name, kind),
            )
        })?;
    }

    load_scenario(tx, scenario_id)
}

/// Find exactly one assumption by (kind, name)
fn lookup_assumption(tx: &Transaction, kind: &str, name: &str) -> CatalogResult<i64> {
    let mut stmt = tx.prepare("SELECT id FROM assumptions WHERE kind = ?1 AND name = ?2")?;
    let rows = stmt.query_map(params![kind, name], |row| row.get(0))?;

    let mut ids: Vec<i64> = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    if ids.len() != 1 {
        return Err(CatalogError::UniqueLookup {
            what: format!("assumption kind={}, name={}", kind, name),
            matched: ids.len(),
        });
    }
    Ok(ids[0])
}

/// Materialize a full scenario record
pub(super) fn load_scenario(tx: &Transaction, scenario_id: i64) -> CatalogResult<Scenario> {
    let name: String = tx
        .query_row(
            "SELECT name FROM scenarios WHERE id = ?1",
            params![scenario_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| CatalogError::EmptyLookup(format!("scenario id={}", scenario_id)))?;

    let mut assumptions = BTreeMap::new();
    {
        let mut stmt = tx.prepare(
            "SELECT sa.assumption_kind, a.name
             FROM scenario_assumptions sa
             JOIN assumptions a ON a.id = sa.assumption_id
             WHERE sa.scenario_id = ?1",
        )?;
        let rows = stmt.query_map(params![scenario_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (kind, assumption_name) = row?;
            assumptions.insert(kind, assumption_name);
        }
    }

    let version: Option<String> = tx
        .query_row(
            "SELECT rh.version
             FROM preferred_versions pv
             JOIN run_history rh ON rh.run_id = pv.run_id
             WHERE pv.scenario_id = ?1",
            params![scenario_id],
            |row| row.get(0),
        )
        .optional()?;

    let mut versions = Vec::new();
    {
        let mut stmt =
            tx.prepare("SELECT version FROM run_history WHERE scenario_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![scenario_id], |row| row.get(0))?;
        for row in rows {
            versions.push(row?);
        }
    }

    Ok(Scenario {
        id: Some(scenario_id),
        name,
        assumptions,
        version,
        versions,
    })
}

/// Select scenarios matching the filter (empty result is not an error here)
pub(super) fn select_scenarios(
    tx: &Transaction,
    filter: &ScenarioFilter,
) -> CatalogResult<Vec<Scenario>> {
    let mut sql = String::from("SELECT id FROM scenarios");
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(name) = &filter.name {
        clauses.push("name = ?");
        values.push(Value::from(name.clone()));
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
        found.push(load_scenario(tx, id)?);
    }
    Ok(found)
}

/// Repoint the preferred version at an existing (scenario, version) run
pub(super) fn update_version(
    tx: &Transaction,
    scenario: &str,
    version: &str,
) -> CatalogResult<Scenario> {
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

    set_preferred(tx, scenario_id, run_ids[0])?;
    load_scenario(tx, scenario_id)
}
