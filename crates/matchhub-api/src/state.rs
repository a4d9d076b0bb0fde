//! Application state shared across all handlers.

use std::sync::Arc;

use matchhub_core::config::AppConfig;
use matchhub_database::DatabasePool;
use matchhub_realtime::GameHub;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Realtime game hub.
    pub hub: Arc<GameHub>,
    /// Database pool (health checks).
    pub db: DatabasePool,
}
