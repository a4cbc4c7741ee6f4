//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use orchestrator::DecisionEngine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Decision engine; holds the per-conversation locks, so one per process.
    pub engine: Arc<DecisionEngine>,
    /// Database connection, for read-only audit queries.
    pub db: Database,
}

impl AppState {
    /// Create new application state.
    pub fn new(engine: DecisionEngine, db: Database) -> Self {
        Self {
            engine: Arc::new(engine),
            db,
        }
    }
}
