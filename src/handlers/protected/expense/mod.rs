// handlers/protected/expense/mod.rs - Owner-scoped expense CRUD

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::Expense;

pub mod add;    // POST /expense/add-expense
pub mod delete; // DELETE /expense/delete-expense/:expenseId
pub mod edit;   // PUT /expense/edit-expense/:expenseId
pub mod get;    // GET /expense/get-expenses/:user_id

pub use add::add_expense;
pub use delete::delete_expense;
pub use edit::edit_expense;
pub use get::get_expenses;

/// Editable expense columns as sent by clients. `amount` may be a JSON
/// number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct ExpenseBody {
    pub amount: Option<Value>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
}
