//! # matchhub-api
//!
//! HTTP surface for MatchHub: the `/ws` WebSocket endpoint carrying the
//! game protocol, plus a health route. All handlers receive [`state::AppState`]
//! via Axum's `State` extractor.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
