pub mod config;
pub mod intelligence;
pub mod rest;
pub mod tasks;

use std::sync::Arc;

use config::DaemonConfig;
use tasks::store::TaskStore;

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    /// In-memory task store. Process-lifetime only; tasks are gone on restart.
    pub store: Arc<TaskStore>,
    pub started_at: std::time::Instant,
}
