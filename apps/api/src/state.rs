use std::sync::Arc;

use crate::config::Config;
use crate::quantity::QuantityPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; every request computes from scratch.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub policy: Arc<QuantityPolicy>,
}

impl AppState {
    pub fn new(config: Config, policy: QuantityPolicy) -> Self {
        AppState {
            config,
            policy: Arc::new(policy),
        }
    }
}
