use std::sync::Arc;

use crate::applications::pipeline::ApplicationPipeline;
use crate::candidates::CandidateStore;
use crate::identity::accounts::AccountStore;
use crate::jobs::catalog::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every store is a trait object: production wires the PostgreSQL stores, tests wire
/// in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub candidates: Arc<dyn CandidateStore>,
    pub jobs: Arc<dyn JobStore>,
    /// Scoring + persistence for apply actions. Holds no per-request state.
    pub pipeline: Arc<ApplicationPipeline>,
}
