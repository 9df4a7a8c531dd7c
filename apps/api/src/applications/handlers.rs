//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::require_candidate;
use crate::errors::AppError;
use crate::jobs::catalog::require_job;
use crate::models::application::ApplicationRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    /// Defaults to the candidate profile's resume.
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Defaults to the job's required skills.
    #[serde(default)]
    pub skills_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub score: f64,
}

/// POST /api/v1/applications
///
/// Texts the caller leaves out are resolved from the stored candidate and job; an
/// unknown id then surfaces as 404 before anything is scored.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let ApplyRequest {
        candidate_id,
        job_id,
        resume_text,
        skills_text,
    } = request;

    let resume_text = match resume_text {
        Some(text) => text,
        None => require_candidate(state.candidates.as_ref(), candidate_id).await?.resume,
    };
    let skills_text = match skills_text {
        Some(text) => text,
        None => require_job(state.jobs.as_ref(), job_id).await?.skills,
    };

    let score = state
        .pipeline
        .apply(candidate_id, job_id, &resume_text, &skills_text)
        .await?;

    Ok((StatusCode::CREATED, Json(ApplyResponse { score })))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let record = state
        .pipeline
        .get(application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;
    Ok(Json(record))
}
