//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::catalog::{post_job, require_job, JobStore, NewJob};
use crate::models::application::ApplicationRow;
use crate::models::job::JobRow;
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_post_job(
    State(state): State<AppState>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let job = post_job(state.accounts.as_ref(), state.jobs.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(state.jobs.list_jobs().await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(require_job(state.jobs.as_ref(), job_id).await?))
}

/// GET /api/v1/jobs/:id/applications
///
/// Applications to one job, highest score first.
pub async fn handle_list_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    require_job(state.jobs.as_ref(), job_id).await?;
    Ok(Json(state.pipeline.list_for_job(job_id).await?))
}
