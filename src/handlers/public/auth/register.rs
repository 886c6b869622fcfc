// handlers/public/auth/register.rs - POST /auth/register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::UserSummary;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Registration;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

/// POST /auth/register - Register new user account
///
/// Expected Input:
/// ```json
/// { "name": "alice", "password": "secret123", "confirmPassword": "secret123" }
/// ```
///
/// Expected Output (201):
/// ```json
/// {
///   "message": "User Registered Successfully!",
///   "user": { "id": 1, "name": "alice", "create_dt": "2024-03-01T12:00:00Z" }
/// }
/// ```
///
/// 400 on missing fields, mismatched confirmation or a taken name.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<RegisterResponse> {
    let Json(payload) = payload?;
    let registration = Registration::new(payload.name, payload.password, payload.confirm_password)?;

    let user = state.auth.register(registration).await?;

    Ok(ApiResponse::created(RegisterResponse {
        message: "User Registered Successfully!",
        user,
    }))
}
