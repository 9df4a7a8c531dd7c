//! In-memory stores for unit and router tests, plus a PostgreSQL pool for the
//! `#[ignore]`d database tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::applications::store::ApplicationStore;
use crate::candidates::CandidateStore;
use crate::db::{create_pool, ensure_schema, PersistenceError};
use crate::identity::accounts::{AccountStore, AccountWriter, NewAccount};
use crate::identity::service::CandidateProfileInput;
use crate::jobs::catalog::JobStore;
use crate::models::application::ApplicationRow;
use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;
use crate::models::user::{Role, UserCredentialsRow};

/// Pool for the database tests; connects to `DATABASE_URL` and creates the schema.
pub async fn postgres_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
    let pool = create_pool(&url, 2).await.expect("connect to test database");
    ensure_schema(&pool).await.expect("create schema");
    pool
}

#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<ApplicationRow>>,
}

impl MemoryStore {
    pub fn records(&self) -> Vec<ApplicationRow> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn create_application(&self, record: &ApplicationRow) -> Result<(), PersistenceError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        if records.iter().any(|r| r.id == record.id) {
            return Err(PersistenceError::Conflict(format!("application {}", record.id)));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationRow>, PersistenceError> {
        let records = self.records.lock().expect("store mutex poisoned");
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_applications_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<ApplicationRow>, PersistenceError> {
        let records = self.records.lock().expect("store mutex poisoned");
        let mut matching: Vec<_> = records.iter().filter(|r| r.job_id == job_id).cloned().collect();
        matching.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.applied_at.cmp(&b.applied_at))
        });
        Ok(matching)
    }
}

/// Rejects every write the way a foreign key violation would.
pub struct MissingReferenceStore;

#[async_trait]
impl ApplicationStore for MissingReferenceStore {
    async fn create_application(&self, _record: &ApplicationRow) -> Result<(), PersistenceError> {
        Err(PersistenceError::MissingReference(
            "applications_job_id_fkey".to_string(),
        ))
    }

    async fn get_application(&self, _id: Uuid) -> Result<Option<ApplicationRow>, PersistenceError> {
        Ok(None)
    }

    async fn list_applications_for_job(
        &self,
        _job_id: Uuid,
    ) -> Result<Vec<ApplicationRow>, PersistenceError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct Tables {
    /// (email, credentials)
    users: Vec<(String, UserCredentialsRow)>,
    candidates: Vec<CandidateRow>,
    jobs: Vec<JobRow>,
}

/// Accounts, candidate profiles and jobs behind one lock, with the same unique and
/// foreign key rules as the PostgreSQL schema.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    tables: Arc<Mutex<Tables>>,
    fail_profile_writes: bool,
}

impl MemoryDirectory {
    /// Every `insert_profile` fails as a database error.
    pub fn failing_profile_writes() -> Self {
        Self {
            fail_profile_writes: true,
            ..Self::default()
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("directory mutex poisoned")
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }

    pub fn candidate_count(&self) -> usize {
        self.tables().candidates.len()
    }

    pub fn candidate(&self, id: Uuid) -> Option<CandidateRow> {
        self.tables().candidates.iter().find(|c| c.id == id).cloned()
    }

    pub fn seed_user(&self, role: Role) -> Uuid {
        let id = Uuid::new_v4();
        let row = UserCredentialsRow {
            id,
            password_digest: "unused".to_string(),
            role: role.as_str().to_string(),
        };
        self.tables().users.push((format!("{id}@seed.test"), row));
        id
    }

    pub fn seed_candidate(&self, resume: &str) -> Uuid {
        let id = self.seed_user(Role::Candidate);
        self.tables().candidates.push(CandidateRow {
            id,
            name: "Seeded Candidate".to_string(),
            skills: String::new(),
            experience: 1,
            resume: resume.to_string(),
        });
        id
    }

    pub fn seed_job(&self, skills: &str) -> Uuid {
        let poster_id = self.seed_user(Role::Hr);
        let id = Uuid::new_v4();
        let mut tables = self.tables();
        // Strictly increasing timestamps keep newest-first ordering stable.
        let created_at = Utc::now() + Duration::milliseconds(tables.jobs.len() as i64);
        tables.jobs.push(JobRow {
            id,
            poster_id,
            title: "Seeded Job".to_string(),
            description: String::new(),
            skills: skills.to_string(),
            min_experience: 0,
            created_at,
        });
        id
    }
}

/// Stages writes until `commit`; dropping it discards them.
struct MemoryWriter {
    tables: Arc<Mutex<Tables>>,
    fail_profile_writes: bool,
    users: Vec<(String, UserCredentialsRow)>,
    candidates: Vec<CandidateRow>,
}

#[async_trait]
impl AccountWriter for MemoryWriter {
    async fn insert_user(&mut self, account: &NewAccount) -> Result<(), PersistenceError> {
        let taken = {
            let tables = self.tables.lock().expect("directory mutex poisoned");
            tables.users.iter().any(|(email, _)| *email == account.email)
        };
        if taken || self.users.iter().any(|(email, _)| *email == account.email) {
            return Err(PersistenceError::Conflict(format!("email {}", account.email)));
        }
        self.users.push((
            account.email.clone(),
            UserCredentialsRow {
                id: account.id,
                password_digest: account.password_digest.clone(),
                role: account.role.as_str().to_string(),
            },
        ));
        Ok(())
    }

    async fn insert_profile(
        &mut self,
        user_id: Uuid,
        profile: &CandidateProfileInput,
    ) -> Result<(), PersistenceError> {
        if self.fail_profile_writes {
            return Err(PersistenceError::Database(sqlx::Error::PoolTimedOut));
        }
        if !self.users.iter().any(|(_, user)| user.id == user_id) {
            return Err(PersistenceError::MissingReference(format!("user {user_id}")));
        }
        self.candidates.push(CandidateRow {
            id: user_id,
            name: profile.name.clone(),
            skills: profile.skills.clone(),
            experience: profile.experience,
            resume: profile.resume.clone(),
        });
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        let MemoryWriter {
            tables,
            users,
            candidates,
            ..
        } = *self;
        let mut tables = tables.lock().expect("directory mutex poisoned");
        tables.users.extend(users);
        tables.candidates.extend(candidates);
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryDirectory {
    async fn begin(&self) -> Result<Box<dyn AccountWriter>, PersistenceError> {
        Ok(Box::new(MemoryWriter {
            tables: Arc::clone(&self.tables),
            fail_profile_writes: self.fail_profile_writes,
            users: Vec::new(),
            candidates: Vec::new(),
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentialsRow>, PersistenceError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(stored, _)| stored == email)
            .map(|(_, user)| user.clone()))
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserCredentialsRow>, PersistenceError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(_, user)| user.id == user_id)
            .map(|(_, user)| user.clone()))
    }
}

#[async_trait]
impl CandidateStore for MemoryDirectory {
    async fn get_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Option<CandidateRow>, PersistenceError> {
        Ok(self.candidate(candidate_id))
    }
}

#[async_trait]
impl JobStore for MemoryDirectory {
    async fn insert_job(&self, job: &JobRow) -> Result<(), PersistenceError> {
        let mut tables = self.tables();
        if !tables.users.iter().any(|(_, user)| user.id == job.poster_id) {
            return Err(PersistenceError::MissingReference(format!("user {}", job.poster_id)));
        }
        tables.jobs.push(job.clone());
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, PersistenceError> {
        let mut jobs = self.tables().jobs.clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobRow>, PersistenceError> {
        Ok(self.tables().jobs.iter().find(|j| j.id == job_id).cloned())
    }
}
