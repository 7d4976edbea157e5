use std::sync::Arc;

use crate::catalog::Catalog;
use crate::session::service::SessionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only reference data: jobs, agents, categories, the mock report.
    pub catalog: Arc<Catalog>,
    /// Room creation and recording against the video backend.
    pub sessions: SessionService,
}
