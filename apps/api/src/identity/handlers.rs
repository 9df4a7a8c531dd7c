//! Axum route handlers for the Auth API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::service::{login, register, RegisterRequest, Session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let id = register(state.accounts.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(login(state.accounts.as_ref(), &request.email, &request.password).await?))
}
