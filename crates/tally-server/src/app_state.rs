//! Shared application state.

use std::sync::Arc;

use tally_core::error::Result;
use tally_core::Registry;

use crate::metrics::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
    metrics: AppMetrics,
}

impl AppState {
    /// Register the demo metrics into `registry`.
    /// Fails if any of their names is already taken.
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        let metrics = AppMetrics::register(&registry)?;
        Ok(Self { registry, metrics })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.metrics
    }
}
