use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Columns login and job posting need from `users`. `password_digest` is only read by
/// `identity`.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentialsRow {
    pub id: Uuid,
    pub password_digest: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Hr,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Hr => "hr",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "candidate" => Some(Role::Candidate),
            "hr" => Some(Role::Hr),
            _ => None,
        }
    }
}
