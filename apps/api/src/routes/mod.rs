pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::candidates;
use crate::identity::handlers as identity;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity
        .route("/api/v1/auth/register", post(identity::handle_register))
        .route("/api/v1/auth/login", post(identity::handle_login))
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate),
        )
        // Job catalog
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_post_job),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route(
            "/api/v1/jobs/:id/applications",
            get(jobs::handle_list_job_applications),
        )
        // Matching + applications
        .route("/api/v1/match/score", post(matching::handle_score))
        .route("/api/v1/applications", post(applications::handle_apply))
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application),
        )
        .with_state(state)
}
