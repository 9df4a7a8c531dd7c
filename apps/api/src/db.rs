use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

/// Tables are created in dependency order; every statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id              UUID PRIMARY KEY,
        email           TEXT NOT NULL UNIQUE,
        password_digest TEXT NOT NULL,
        role            TEXT NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS candidates (
        id         UUID PRIMARY KEY REFERENCES users (id),
        name       TEXT NOT NULL,
        skills     TEXT NOT NULL,
        experience INTEGER NOT NULL CHECK (experience >= 0),
        resume     TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id             UUID PRIMARY KEY,
        poster_id      UUID NOT NULL REFERENCES users (id),
        title          TEXT NOT NULL,
        description    TEXT NOT NULL,
        skills         TEXT NOT NULL,
        min_experience INTEGER NOT NULL CHECK (min_experience >= 0),
        created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    // No UNIQUE (candidate_id, job_id): re-applying creates a second row.
    r#"
    CREATE TABLE IF NOT EXISTS applications (
        id           UUID PRIMARY KEY,
        candidate_id UUID NOT NULL REFERENCES candidates (id),
        job_id       UUID NOT NULL REFERENCES jobs (id),
        score        DOUBLE PRECISION NOT NULL CHECK (score >= 0 AND score <= 100),
        applied_at   TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS applications_job_id_idx ON applications (job_id)",
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates any missing tables.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready ({} statements)", SCHEMA.len());
    Ok(())
}

/// Storage failure surfaced by any persistence call.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Unique constraint violated (e.g. an email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Foreign key violated: the referenced candidate, job or user does not exist.
    #[error("referenced record does not exist: {0}")]
    MissingReference(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return PersistenceError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return PersistenceError::MissingReference(db_err.message().to_string());
            }
        }
        PersistenceError::Database(err)
    }
}
