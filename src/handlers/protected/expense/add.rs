use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use super::{ExpenseBody, ExpenseResponse};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::expense_service::{build_fields, parse_body_id};
use crate::services::ExpenseError;

#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub user_id: Option<Value>,
    #[serde(flatten)]
    pub body: ExpenseBody,
}

/// POST /expense/add-expense - Record a new expense for the caller
///
/// Expected Input:
/// ```json
/// { "user_id": 1, "amount": 12.5, "description": "Lunch", "category": "Food", "date": "2024-03-01" }
/// ```
///
/// `user_id` must be the authenticated user's id (403 otherwise).
pub async fn add_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AddExpenseRequest>, JsonRejection>,
) -> ApiResult<ExpenseResponse> {
    let Json(payload) = payload?;

    let owner = match payload.user_id.as_ref().filter(|v| !v.is_null()) {
        Some(raw) => parse_body_id(raw, "Invalid User ID")?,
        None => return Err(ExpenseError::Validation("All fields are required".into()).into()),
    };
    let body = payload.body;
    let fields = build_fields(
        body.amount.as_ref(),
        body.description.as_deref(),
        body.category.as_deref(),
        body.date.as_deref(),
    )?;

    let expense = state.expenses.create(user.id, owner, fields).await?;
    tracing::debug!("User {} added expense {}", user.id, expense.id);

    Ok(ApiResponse::created(ExpenseResponse { expense }))
}
