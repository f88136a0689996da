// File: src/storage/sqlite/assumptions.rs

use super::convert;
use super::scenarios::resolve_scenario;
use super::store::CatalogStore;
use crate::error::{map_constraint, CatalogError, CatalogResult};
use crate::model::{Assumption, AssumptionFilter, AssumptionUpdate, NewAssumption};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Transaction};

impl CatalogStore {
    /// Create a new assumption
    pub fn put_assumption(&self, new: &NewAssumption) -> CatalogResult<Assumption> {
        self.with_tx(|tx| insert_assumption(tx, new))
    }

    /// Get assumptions matching the filter
    pub fn get_assumptions(&self, filter: &AssumptionFilter) -> CatalogResult<Vec<Assumption>> {
        let found = self.with_tx(|tx| select_assumptions(tx, filter))?;
        if found.is_empty() {
            return Err(CatalogError::EmptyLookup("assumptions".into()));
        }
        Ok(found)
    }

    /// Get the distinct assumption kinds present in the catalog
    pub fn get_assumption_kinds(&self) -> CatalogResult<Vec<String>> {
        self.with_tx(select_kinds)
    }

    /// Get the assumptions bound to a scenario
    pub fn get_assumptions_for_scenario(&self, scenario: &str) -> CatalogResult<Vec<Assumption>> {
        self.with_tx(|tx| select_for_scenario(tx, scenario))
    }

    /// Update an assumption in place
    pub fn update_assumption(
        &self,
        id: i64,
        update: &AssumptionUpdate,
    ) -> CatalogResult<Assumption> {
        self.with_tx(|tx| update_assumption_row(tx, id, update))
    }

    /// Delete an assumption; fails if a scenario still references it
    pub fn delete_assumption(&self, id: i64) -> CatalogResult<()> {
        self.with_tx(|tx| delete_assumption_row(tx, id))
    }
}

/// Insert a single assumption within a transaction
pub(super) fn insert_assumption(
    tx: &Transaction,
    new: &NewAssumption,
) -> CatalogResult<Assumption> {
    let by_name: i64 = tx.query_row(
        "SELECT COUNT(*) FROM assumptions WHERE name = ?1 AND kind = ?2",
        params![new.name, new.kind],
        |row| row.get(0),
    )?;
    if by_name > 0 {
        return Err(CatalogError::Duplicate {
            what: "assumption".into(),
            fields: format!("name={}, kind={}", new.name, new.kind),
        });
    }

    let by_detail: i64 = tx.query_row(
        "SELECT COUNT(*) FROM assumptions WHERE detail = ?1 AND kind = ?2",
        params![new.detail, new.kind],
        |row| row.get(0),
    )?;
    if by_detail > 0 {
        return Err(CatalogError::Duplicate {
            what: "assumption".into(),
            fields: format!("detail={}, kind={}", new.detail, new.kind),
        });
    }

    tx.execute(
        "INSERT INTO assumptions (name, kind, detail) VALUES (?1, ?2, ?3)",
        params![new.name, new.kind, new.detail],
    )
    .map_err(|e| {
        map_constraint(
            e,
            "assumption",
            format!("name={}, kind={}", new.name, new.kind),
        )
    })?;

    Ok(Assumption {
        id: Some(tx.last_insert_rowid()),
        name: new.name.clone(),
        kind: new.kind.clone(),
        detail: new.detail.clone(),
    })
}

/// Select assumptions matching the filter (empty result is not an error here)
pub(super) fn select_assumptions(
    tx: &Transaction,
    filter: &AssumptionFilter,
) -> CatalogResult<Vec<Assumption>> {
    let mut sql = String::from("SELECT id, name, kind, detail FROM assumptions");
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(kind) = &filter.kind {
        clauses.push("kind = ?");
        values.push(Value::from(kind.clone()));
    }
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

    let mut stmt = tx.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), convert::row_to_assumption)?;

    let mut found = Vec::new();
    for row in rows {
        found.push(row?);
    }
    Ok(found)
}

fn select_kinds(tx: &Transaction) -> CatalogResult<Vec<String>> {
    let mut stmt = tx.prepare("SELECT DISTINCT kind FROM assumptions ORDER BY kind")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut kinds = Vec::new();
    for row in rows {
        kinds.push(row?);
    }
    Ok(kinds)
}

fn select_for_scenario(tx: &Transaction, scenario: &str) -> CatalogResult<Vec<Assumption>> {
    let scenario_id = resolve_scenario(tx, scenario)?;

    let mut stmt = tx.prepare(
        "SELECT a.id, a.name, a.kind, a.detail
         FROM assumptions a
         JOIN scenario_assumptions sa ON sa.assumption_id = a.id
         WHERE sa.scenario_id = ?1
         ORDER BY a.kind",
    )?;
    let rows = stmt.query_map(params![scenario_id], convert::row_to_assumption)?;

    let mut found = Vec::new();
    for row in rows {
        found.push(row?);
    }
    Ok(found)
}

fn update_assumption_row(
    tx: &Transaction,
    id: i64,
    update: &AssumptionUpdate,
) -> CatalogResult<Assumption> {
    let current = tx
        .query_row(
            "SELECT id, name, kind, detail FROM assumptions WHERE id = ?1",
            params![id],
            convert::row_to_assumption,
        )
        .optional()?
        .ok_or_else(|| CatalogError::EmptyLookup(format!("assumption id={}", id)))?;

    let name = update.name.clone().unwrap_or(current.name);
    let kind = update.kind.clone().unwrap_or(current.kind);
    let detail = update.detail.clone().unwrap_or(current.detail);

    tx.execute(
        "UPDATE assumptions SET name = ?1, kind = ?2, detail = ?3 WHERE id = ?4",
        params![name, kind, detail, id],
    )
    .map_err(|e| map_constraint(e, "assumption", format!("name={}, kind={}", name, kind)))?;

    Ok(Assumption {
        id: Some(id),
        name,
        kind,
        detail,
    })
}

fn delete_assumption_row(tx: &Transaction, id: i64) -> CatalogResult<()> {
    let referenced: i64 = tx.query_row(
        "SELECT COUNT(*) FROM scenario_assumptions WHERE assumption_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if referenced > 0 {
        return Err(CatalogError::Referential(format!(
            "assumption id={} is referenced by {} scenario(s)",
            id, referenced
        )));
    }

    let deleted = tx.execute("DELETE FROM assumptions WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(CatalogError::EmptyLookup(format!("assumption id={}", id)));
    }
    Ok(())
}
