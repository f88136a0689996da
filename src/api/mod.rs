//! HTTP API

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

#[allow(unused_imports)]
pub use router::create_router;
#[allow(unused_imports)]
pub use state::AppState;
