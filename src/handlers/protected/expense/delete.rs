use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Serialize;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::expense_service::parse_path_id;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// DELETE /expense/delete-expense/:expenseId
///
/// 404 when the expense does not exist or belongs to another user.
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(expense_id): Path<String>,
) -> ApiResult<DeleteResponse> {
    let expense_id = parse_path_id(&expense_id, "Invalid Expense ID")?;
    state.expenses.delete(user.id, expense_id).await?;
    tracing::debug!("User {} deleted expense {}", user.id, expense_id);

    Ok(ApiResponse::success(DeleteResponse {
        message: "Expense Deleted Successfully",
    }))
}
