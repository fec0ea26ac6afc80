//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search orchestrator
    pub search: Arc<Search>,
    /// Provider metrics, absent when disabled
    pub metrics: Option<Arc<Metrics>>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, search: Search, metrics: Option<Arc<Metrics>>) -> Self {
        Self {
            settings: Arc::new(settings),
            search: Arc::new(search),
            metrics,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
