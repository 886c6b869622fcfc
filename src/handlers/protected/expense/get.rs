use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Serialize;

use crate::app::AppState;
use crate::database::Expense;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::expense_service::parse_path_id;

#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
}

/// GET /expense/get-expenses/:user_id - List the caller's expenses, newest first
pub async fn get_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> ApiResult<ExpensesResponse> {
    let owner = parse_path_id(&user_id, "Invalid User ID")?;
    let expenses = state.expenses.list(user.id, owner).await?;

    Ok(ApiResponse::success(ExpensesResponse { expenses }))
}
