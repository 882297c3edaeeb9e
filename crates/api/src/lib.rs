//! Purple API
//!
//! Axum routes and middleware for the Purple quote aggregator.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
