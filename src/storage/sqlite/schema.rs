// File: src/storage/sqlite/schema.rs

use crate::error::CatalogResult;
use rusqlite::Connection;

/// Create all tables (idempotent)
pub fn create_tables(conn: &Connection) -> CatalogResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Model assumptions, unique per kind by name and by detail
CREATE TABLE IF NOT EXISTS assumptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    detail TEXT NOT NULL,
    UNIQUE (name, kind),
    UNIQUE (detail, kind)
);

-- Scenarios: a named bundle of one assumption per kind
CREATE TABLE IF NOT EXISTS scenarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Scenario to assumption mapping, one assumption per kind
CREATE TABLE IF NOT EXISTS scenario_assumptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scenario_id INTEGER NOT NULL,
    assumption_kind TEXT NOT NULL,
    assumption_id INTEGER NOT NULL,
    UNIQUE (scenario_id, assumption_kind),
    FOREIGN KEY (scenario_id) REFERENCES scenarios(id),
    FOREIGN KEY (assumption_id) REFERENCES assumptions(id)
);

-- Model runs; version lives in run_history
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scenario_id INTEGER NOT NULL,
    parent_id INTEGER,                      -- lineage, NULL for root runs
    contact TEXT NOT NULL,
    confidential INTEGER NOT NULL DEFAULT 0,
    published INTEGER NOT NULL DEFAULT 0,
    code_version TEXT NOT NULL,
    detail TEXT NOT NULL,
    FOREIGN KEY (scenario_id) REFERENCES scenarios(id),
    FOREIGN KEY (parent_id) REFERENCES runs(id) ON DELETE SET NULL
);

-- Per-scenario version history; each run appears exactly once
CREATE TABLE IF NOT EXISTS run_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL UNIQUE,
    scenario_id INTEGER NOT NULL,
    version TEXT NOT NULL,
    UNIQUE (scenario_id, version),
    FOREIGN KEY (run_id) REFERENCES runs(id),
    FOREIGN KEY (scenario_id) REFERENCES scenarios(id)
);

-- Preferred run per scenario
CREATE TABLE IF NOT EXISTS preferred_versions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scenario_id INTEGER NOT NULL UNIQUE,
    run_id INTEGER NOT NULL,
    FOREIGN KEY (scenario_id) REFERENCES scenarios(id),
    FOREIGN KEY (run_id) REFERENCES runs(id)
);

-- Named dataset paths, unique per category by name
CREATE TABLE IF NOT EXISTS named_paths (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    path TEXT NOT NULL,                     -- normalized /A/B/C/D/E/F/
    category TEXT NOT NULL,
    period_type TEXT NOT NULL,
    interval TEXT NOT NULL,
    units TEXT NOT NULL,
    detail TEXT NOT NULL,
    UNIQUE (name, category)
);

-- Which paths carry data for which runs
CREATE TABLE IF NOT EXISTS common_catalog (
    run_id INTEGER NOT NULL,
    path_id INTEGER NOT NULL,
    PRIMARY KEY (run_id, path_id),
    FOREIGN KEY (run_id) REFERENCES runs(id),
    FOREIGN KEY (path_id) REFERENCES named_paths(id)
);

-- Dense timeseries points, one row per datetime
CREATE TABLE IF NOT EXISTS timeseries_ledger (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL,
    path_id INTEGER NOT NULL,
    datetime REAL NOT NULL,                 -- seconds since 1900-01-01T00:00:00 UTC
    value REAL NOT NULL,
    UNIQUE (run_id, path_id, datetime),
    FOREIGN KEY (run_id) REFERENCES runs(id),
    FOREIGN KEY (path_id) REFERENCES named_paths(id)
);

-- Reserved: derived metric definitions
CREATE TABLE IF NOT EXISTS metrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    index_detail TEXT NOT NULL,
    detail TEXT NOT NULL
);

-- Reserved: computed metric values per (path, run, metric)
CREATE TABLE IF NOT EXISTS metric_values (
    path_id INTEGER NOT NULL,
    run_id INTEGER NOT NULL,
    metric_id INTEGER NOT NULL,
    idx INTEGER NOT NULL,
    units TEXT NOT NULL,
    value REAL NOT NULL,
    PRIMARY KEY (path_id, run_id, metric_id),
    FOREIGN KEY (path_id) REFERENCES named_paths(id),
    FOREIGN KEY (run_id) REFERENCES runs(id),
    FOREIGN KEY (metric_id) REFERENCES metrics(id)
);

-- Indices for common queries
CREATE INDEX IF NOT EXISTS idx_ledger_run_path ON timeseries_ledger(run_id, path_id);
CREATE INDEX IF NOT EXISTS idx_history_scenario ON run_history(scenario_id);
CREATE INDEX IF NOT EXISTS idx_runs_scenario ON runs(scenario_id);
"#;
