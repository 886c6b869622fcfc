use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Expense {
    pub id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub expense_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Caller-editable columns of an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFields {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub expense_date: NaiveDate,
}
