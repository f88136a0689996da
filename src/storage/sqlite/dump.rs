// File: src/storage/sqlite/dump.rs

use super::convert;
use super::store::CatalogStore;
use super::{assumptions, paths, runs, scenarios, timeseries};
use crate::error::{map_constraint, CatalogError, CatalogResult};
use crate::model::{
    Assumption, AssumptionFilter, DumpDocument, LoadCounts, LoadReport, Metric, MetricValue,
    NamedPath, NewAssumption, NewNamedPath, NewRun, NewScenario, PathFilter, Run, RunFilter,
    ScenarioFilter,
};
use rusqlite::{params, Transaction};

impl CatalogStore {
    /// Export the whole catalog as one document
    ///
    /// Reads everything inside a single transaction so the document is a
    /// consistent snapshot.
    pub fn dump(&self) -> CatalogResult<DumpDocument> {
        self.with_tx(|tx| {
            let found_assumptions =
                assumptions::select_assumptions(tx, &AssumptionFilter::default())?;
            let found_scenarios = scenarios::select_scenarios(tx, &ScenarioFilter::default())?;
            let found_paths = paths::select_paths(tx, &PathFilter::default())?;
            let found_runs = runs::select_runs(tx, &RunFilter::default())?;

            let mut found_series = Vec::new();
            for run in &found_runs {
                let run_id = run
                    .id
                    .ok_or_else(|| CatalogError::Internal("run record without id".into()))?;
                found_series.extend(timeseries::select_run_series(
                    tx,
                    run_id,
                    &run.scenario,
                    &run.version,
                )?);
            }

            Ok(DumpDocument {
                assumptions: found_assumptions,
                scenarios: found_scenarios,
                paths: found_paths,
                runs: found_runs,
                timeseries: found_series,
                metrics: select_metrics(tx)?,
                metric_values: select_metric_values(tx)?,
            })
        })
    }

    /// Export the catalog as pretty-printed JSON
    pub fn dump_to_writer<W: std::io::Write>(&self, writer: W) -> CatalogResult<()> {
        let doc = self.dump()?;
        serde_json::to_writer_pretty(writer, &doc)
            .map_err(|e| CatalogError::Internal(format!("dump serialization: {}", e)))?;
        Ok(())
    }

    /// Re-create catalog contents from a dump document
    ///
    /// Families load in dependency order. Each item gets its own transaction;
    /// items that collide with existing records are counted and skipped, so
    /// loading the same document twice is harmless.
    pub fn load(&self, doc: &DumpDocument) -> CatalogResult<LoadReport> {
        let mut report = LoadReport::default();

        for record in &doc.assumptions {
            let new = new_assumption(record);
            tally(
                self.with_tx(|tx| assumptions::insert_assumption(tx, &new).map(|_| ())),
                &mut report.assumptions,
                "assumption",
                &record.name,
            )?;
        }

        for record in &doc.paths {
            let new = new_path(record);
            tally(
                self.with_tx(|tx| paths::insert_path(tx, &new).map(|_| ())),
                &mut report.paths,
                "path",
                &record.name,
            )?;
        }

        for record in &doc.scenarios {
            let new = new_scenario(record);
            tally(
                self.with_tx(|tx| scenarios::insert_scenario(tx, &new).map(|_| ())),
                &mut report.scenarios,
                "scenario",
                &record.name,
            )?;
        }

        // Dump order is creation order, so parents land before children
        for record in &doc.runs {
            let new = new_run(record);
            tally(
                self.with_tx(|tx| runs::insert_run(tx, &new).map(|_| ())),
                &mut report.runs,
                "run",
                &record.version,
            )?;
        }

        // Preferred versions are restored after every run exists
        for record in &doc.scenarios {
            if let Some(version) = &record.version {
                if let Err(e) =
                    self.with_tx(|tx| scenarios::update_version(tx, &record.name, version))
                {
                    tracing::warn!(
                        scenario = %record.name,
                        version = %version,
                        error = %e,
                        "could not restore preferred version"
                    );
                }
            }
        }

        for record in &doc.timeseries {
            tally(
                self.put_timeseries(record).map(|_| ()),
                &mut report.timeseries,
                "timeseries",
                &record.path,
            )?;
        }

        for record in &doc.metrics {
            tally(
                self.with_tx(|tx| insert_metric(tx, record)),
                &mut report.metrics,
                "metric",
                &record.name,
            )?;
        }

        for record in &doc.metric_values {
            let label = format!(
                "path_id={}, run_id={}, metric_id={}",
                record.path_id, record.run_id, record.metric_id
            );
            tally(
                self.with_tx(|tx| insert_metric_value(tx, record)),
                &mut report.metric_values,
                "metric value",
                &label,
            )?;
        }

        Ok(report)
    }

    /// Re-create catalog contents from a JSON dump
    pub fn load_from_reader<R: std::io::Read>(&self, reader: R) -> CatalogResult<LoadReport> {
        let doc: DumpDocument = serde_json::from_reader(reader)
            .map_err(|e| CatalogError::BadInput(format!("invalid dump document: {}", e)))?;
        self.load(&doc)
    }
}

/// Count one load outcome, skipping rejected items and propagating real faults
fn tally(
    result: CatalogResult<()>,
    counts: &mut LoadCounts,
    what: &str,
    label: &str,
) -> CatalogResult<()> {
    match result {
        Ok(()) => counts.created += 1,
        Err(e) if e.status_code().is_client_error() => {
            tracing::warn!(item = %label, error = %e, "skipping {} on load", what);
            counts.skipped += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn new_assumption(record: &Assumption) -> NewAssumption {
    NewAssumption {
        name: record.name.clone(),
        kind: record.kind.clone(),
        detail: record.detail.clone(),
    }
}

fn new_path(record: &NamedPath) -> NewNamedPath {
    NewNamedPath {
        name: record.name.clone(),
        path: record.path.clone(),
        category: record.category.as_str().to_string(),
        period_type: record.period_type.as_str().to_string(),
        interval: record.interval.as_str().to_string(),
        units: record.units.clone(),
        detail: record.detail.clone(),
    }
}

fn new_scenario(record: &crate::model::Scenario) -> NewScenario {
    NewScenario {
        name: record.name.clone(),
        assumptions: record.assumptions.clone(),
        preferred_run: None,
    }
}

fn new_run(record: &Run) -> NewRun {
    NewRun {
        scenario: record.scenario.clone(),
        version: record.version.clone(),
        contact: record.contact.clone(),
        code_version: record.code_version.clone(),
        detail: record.detail.clone(),
        parent: record.parent.clone(),
        children: Vec::new(),
        confidential: record.confidential,
        published: record.published,
        // Preference is restored from the scenario records afterwards
        prefer_this_version: false,
    }
}

fn insert_metric(tx: &Transaction, metric: &Metric) -> CatalogResult<()> {
    let existing: i64 = tx.query_row(
        "SELECT COUNT(*) FROM metrics WHERE name = ?1",
        params![metric.name],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Err(CatalogError::Duplicate {
            what: "metric".into(),
            fields: format!("name={}", metric.name),
        });
    }

    tx.execute(
        "INSERT INTO metrics (name, index_detail, detail) VALUES (?1, ?2, ?3)",
        params![metric.name, metric.index_detail, metric.detail],
    )?;
    Ok(())
}

fn insert_metric_value(tx: &Transaction, value: &MetricValue) -> CatalogResult<()> {
    tx.execute(
        "INSERT INTO metric_values (path_id, run_id, metric_id, idx, units, value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            value.path_id,
            value.run_id,
            value.metric_id,
            value.idx,
            value.units,
            value.value,
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            "metric value",
            format!(
                "path_id={}, run_id={}, metric_id={}",
                value.path_id, value.run_id, value.metric_id
            ),
        )
    })?;
    Ok(())
}

fn select_metrics(tx: &Transaction) -> CatalogResult<Vec<Metric>> {
    let mut stmt = tx.prepare("SELECT id, name, index_detail, detail FROM metrics ORDER BY id")?;
    let rows = stmt.query_map([], convert::row_to_metric)?;

    let mut found = Vec::new();
    for row in rows {
        found.push(row?);
    }
    Ok(found)
}

fn select_metric_values(tx: &Transaction) -> CatalogResult<Vec<MetricValue>> {
    let mut stmt = tx.prepare(
        "SELECT path_id, run_id, metric_id, idx, units, value
         FROM metric_values
         ORDER BY path_id, run_id, metric_id",
    )?;
    let rows = stmt.query_map([], convert::row_to_metric_value)?;

    let mut found = Vec::new();
    for row in rows {
        found.push(row?);
    }
    Ok(found)
}
