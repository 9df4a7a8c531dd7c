use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scored application. Written once by the pipeline, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    /// 0.00 – 100.00, two decimals.
    pub score: f64,
    pub applied_at: DateTime<Utc>,
}
