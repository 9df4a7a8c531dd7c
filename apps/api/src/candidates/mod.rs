//! Candidate profiles. Rows are written once at registration (see `identity`) and only
//! read afterwards.

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::PersistenceError;
use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn get_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Option<CandidateRow>, PersistenceError>;
}

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn get_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Option<CandidateRow>, PersistenceError> {
        Ok(
            sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

pub async fn require_candidate(
    candidates: &dyn CandidateStore,
    candidate_id: Uuid,
) -> Result<CandidateRow, AppError> {
    candidates
        .get_candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    Ok(Json(
        require_candidate(state.candidates.as_ref(), candidate_id).await?,
    ))
}
