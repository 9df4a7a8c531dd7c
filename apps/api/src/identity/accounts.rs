//! Persistence seam for accounts.
//!
//! Registration writes through an `AccountWriter`: nothing it writes is visible before
//! `commit`, and dropping it uncommitted discards every write. `PgAccountWriter` wraps
//! one sqlx transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::PersistenceError;
use crate::identity::service::CandidateProfileInput;
use crate::models::user::{Role, UserCredentialsRow};

/// A `users` row about to be written. `email` is already normalized.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub password_digest: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait AccountWriter: Send {
    async fn insert_user(&mut self, account: &NewAccount) -> Result<(), PersistenceError>;

    async fn insert_profile(
        &mut self,
        user_id: Uuid,
        profile: &CandidateProfileInput,
    ) -> Result<(), PersistenceError>;

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn AccountWriter>, PersistenceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentialsRow>, PersistenceError>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserCredentialsRow>, PersistenceError>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct PgAccountWriter {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AccountWriter for PgAccountWriter {
    async fn insert_user(&mut self, account: &NewAccount) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_digest, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_digest)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_profile(
        &mut self,
        user_id: Uuid,
        profile: &CandidateProfileInput,
    ) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO candidates (id, name, skills, experience, resume)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&profile.name)
        .bind(&profile.skills)
        .bind(profile.experience)
        .bind(&profile.resume)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn begin(&self) -> Result<Box<dyn AccountWriter>, PersistenceError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgAccountWriter { tx }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentialsRow>, PersistenceError> {
        Ok(sqlx::query_as::<_, UserCredentialsRow>(
            "SELECT id, password_digest, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserCredentialsRow>, PersistenceError> {
        Ok(sqlx::query_as::<_, UserCredentialsRow>(
            "SELECT id, password_digest, role FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
