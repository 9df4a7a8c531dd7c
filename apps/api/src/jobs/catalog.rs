use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::PersistenceError;
use crate::errors::AppError;
use crate::identity::accounts::AccountStore;
use crate::models::job::JobRow;
use crate::models::user::Role;

/// Fields supplied when posting a job.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub poster_id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: String,
    pub min_experience: i32,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.min_experience < 0 {
            return Err(AppError::Validation(
                "min_experience must be zero or more years".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert_job(&self, job: &JobRow) -> Result<(), PersistenceError>;

    /// All jobs, newest first.
    async fn list_jobs(&self) -> Result<Vec<JobRow>, PersistenceError>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobRow>, PersistenceError>;
}

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn insert_job(&self, job: &JobRow) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, poster_id, title, description, skills, min_experience, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id)
        .bind(job.poster_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.skills)
        .bind(job.min_experience)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, PersistenceError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobRow>, PersistenceError> {
        Ok(sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

/// Validates and inserts a job. Only `hr` accounts may post; an unknown poster is
/// `NotFound`, any other role is `Forbidden`.
pub async fn post_job(
    accounts: &dyn AccountStore,
    jobs: &dyn JobStore,
    job: NewJob,
) -> Result<JobRow, AppError> {
    job.validate()?;

    let poster = accounts
        .find_by_id(job.poster_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Poster {} not found", job.poster_id)))?;
    if Role::parse(&poster.role) != Some(Role::Hr) {
        warn!(poster_id = %poster.id, role = %poster.role, "job post rejected");
        return Err(AppError::Forbidden(
            "only hr accounts can post jobs".to_string(),
        ));
    }

    let row = JobRow {
        id: Uuid::new_v4(),
        poster_id: job.poster_id,
        title: job.title,
        description: job.description,
        skills: job.skills,
        min_experience: job.min_experience,
        created_at: Utc::now(),
    };
    jobs.insert_job(&row).await?;

    info!("Posted job {} by {}", row.id, row.poster_id);
    Ok(row)
}

/// `JobStore::get_job`, with absence turned into `AppError::NotFound`.
pub async fn require_job(jobs: &dyn JobStore, job_id: Uuid) -> Result<JobRow, AppError> {
    jobs.get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}
