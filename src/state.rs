use crate::metrics::Metrics;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<dyn Metrics + Send + Sync>,
}

impl AppState {
    pub fn new(metrics: Arc<dyn Metrics + Send + Sync>) -> Self {
        Self { metrics }
    }
}
