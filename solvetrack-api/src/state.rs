//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use crate::service::QueryService;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside query service over the record store and cache adapter.
    pub service: Arc<QueryService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: Arc<QueryService>) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}
