//! Axum route handlers for the Matching API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::MatchingEngine;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub skills_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
}

/// POST /api/v1/match/score
///
/// Stateless preview of the score an application would receive. Nothing is persisted.
pub async fn handle_score(Json(request): Json<ScoreRequest>) -> Result<Json<ScoreResponse>, AppError> {
    let score = MatchingEngine::new().score(&request.resume_text, &request.skills_text)?;
    Ok(Json(ScoreResponse { score }))
}
