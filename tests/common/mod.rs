//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure including:
//! - Test app setup with an in-memory catalog
//! - Seed data for the standard baseline scenario
//! - Custom assertions for API responses

pub mod assertions;

// Re-export commonly used items
#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

// Re-export frequently used external types for convenience
#[allow(unused_imports)]
pub use axum::body::Body;
#[allow(unused_imports)]
pub use axum::http::{Request, StatusCode};
#[allow(unused_imports)]
pub use std::sync::Arc;
#[allow(unused_imports)]
pub use tower::ServiceExt;
