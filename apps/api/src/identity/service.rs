use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::accounts::{AccountStore, NewAccount};
use crate::identity::credentials::{hash_password, verify_password};
use crate::models::user::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateProfileInput {
    pub name: String,
    pub skills: String,
    pub experience: i32,
    pub resume: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub profile: Option<CandidateProfileInput>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(AppError::Validation("email must be a valid address".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        match (self.role, &self.profile) {
            (Role::Candidate, None) => Err(AppError::Validation(
                "candidate registration requires a profile".to_string(),
            )),
            (Role::Candidate, Some(profile)) if profile.experience < 0 => Err(
                AppError::Validation("experience must be zero or more years".to_string()),
            ),
            (Role::Hr, Some(_)) => Err(AppError::Validation(
                "profile only applies to candidate accounts".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub role: Role,
}

/// Creates the account and, for candidates, the profile row in one unit of work.
/// A failure on either insert leaves neither behind.
pub async fn register(accounts: &dyn AccountStore, request: RegisterRequest) -> Result<Uuid, AppError> {
    request.validate()?;

    let password = request.password.clone();
    let password_digest = task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task failed")??;

    let account = NewAccount {
        id: Uuid::new_v4(),
        email: normalize_email(&request.email),
        password_digest,
        role: request.role,
        created_at: Utc::now(),
    };

    // Dropping the writer on an early return discards the user row.
    let mut writer = accounts.begin().await?;
    writer.insert_user(&account).await?;
    if let Some(profile) = &request.profile {
        writer.insert_profile(account.id, profile).await?;
    }
    writer.commit().await?;

    info!("Registered {} account {}", account.role.as_str(), account.id);
    Ok(account.id)
}

/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(accounts: &dyn AccountStore, email: &str, password: &str) -> Result<Session, AppError> {
    let Some(user) = accounts.find_by_email(&normalize_email(email)).await? else {
        warn!("Login failed: unknown account");
        return Err(AppError::Unauthorized);
    };

    let password = password.to_string();
    let digest = user.password_digest.clone();
    let verified = task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .context("password verification task failed")?;
    if !verified {
        warn!("Login failed for {}", user.id);
        return Err(AppError::Unauthorized);
    }

    let role = Role::parse(&user.role).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("user {} has unknown role '{}'", user.id, user.role))
    })?;

    Ok(Session { id: user.id, role })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
