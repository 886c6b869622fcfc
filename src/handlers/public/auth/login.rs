// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::UserSummary;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Credentials;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserSummary,
    pub token: String,
    pub expires_in: i64,
}

/// POST /auth/login - Authenticate user and receive JWT token
///
/// Expected Input:
/// ```json
/// { "name": "alice", "password": "secret123" }
/// ```
///
/// Expected Output (200):
/// ```json
/// {
///   "message": "Login successful",
///   "user": { "id": 1, "name": "alice", "create_dt": "2024-03-01T12:00:00Z" },
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "expires_in": 3600
/// }
/// ```
///
/// Unknown name and wrong password both yield the same 400 body.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;
    let credentials = Credentials::new(payload.name, payload.password)?;

    let outcome = state.auth.login(credentials).await?;

    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful",
        user: outcome.user,
        token: outcome.token.token,
        expires_in: state.tokens.ttl().num_seconds(),
    }))
}
