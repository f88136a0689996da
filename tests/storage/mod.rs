//! Storage layer integration tests
//!
//! Tests for the SQLite-backed catalog store:
//! - Record CRUD and duplicate handling
//! - Ledger block storage and ordering
//! - Dump and load round trips
