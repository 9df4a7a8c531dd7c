//! Persistence seam for scored applications.
//!
//! `ApplicationPipeline` holds an `Arc<dyn ApplicationStore>`; production wires
//! `PgApplicationStore`, tests wire an in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::PersistenceError;
use crate::models::application::ApplicationRow;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Writes one new record. Never updates an existing one.
    async fn create_application(&self, record: &ApplicationRow) -> Result<(), PersistenceError>;

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationRow>, PersistenceError>;

    /// Applications for one job, best score first, ties by earliest application.
    async fn list_applications_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<ApplicationRow>, PersistenceError>;
}

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn create_application(&self, record: &ApplicationRow) -> Result<(), PersistenceError> {
        // Single statement: the row is either fully written or not at all.
        sqlx::query(
            r#"
            INSERT INTO applications (id, candidate_id, job_id, score, applied_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(record.candidate_id)
        .bind(record.job_id)
        .bind(record.score)
        .bind(record.applied_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationRow>, PersistenceError> {
        Ok(
            sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_applications_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<ApplicationRow>, PersistenceError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM applications WHERE job_id = $1 ORDER BY score DESC, applied_at ASC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
