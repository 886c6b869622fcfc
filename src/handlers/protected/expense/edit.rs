use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use super::{ExpenseBody, ExpenseResponse};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::expense_service::{build_fields, parse_path_id};

/// PUT /expense/edit-expense/:expenseId - Replace the editable columns
///
/// Expected Input:
/// ```json
/// { "amount": "20.00", "description": "Dinner", "category": "Food", "date": "2024-03-02" }
/// ```
///
/// 404 when the expense does not exist or belongs to another user.
pub async fn edit_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(expense_id): Path<String>,
    payload: Result<Json<ExpenseBody>, JsonRejection>,
) -> ApiResult<ExpenseResponse> {
    let expense_id = parse_path_id(&expense_id, "Invalid Expense ID")?;
    let Json(body) = payload?;
    let fields = build_fields(
        body.amount.as_ref(),
        body.description.as_deref(),
        body.category.as_deref(),
        body.date.as_deref(),
    )?;

    let expense = state.expenses.update(user.id, expense_id, fields).await?;

    Ok(ApiResponse::success(ExpenseResponse { expense }))
}
