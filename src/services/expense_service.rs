use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use thiserror::Error;

use crate::database::{DatabaseError, Expense, ExpenseFields, ExpenseRepository};

/// Exclusive upper bound on amounts; NUMERIC(12, 2) holds ten integer digits.
const MAX_AMOUNT_UNITS: i64 = 10_000_000_000;

/// Width of `expenses.category`, counted in characters.
pub const MAX_CATEGORY_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("{0}")]
    Validation(String),

    #[error("expenses belong to another user")]
    NotOwner,

    #[error("expense {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Owner-scoped expense CRUD. `caller` is always the id resolved from the
/// session token, never a value taken from the request body alone.
#[derive(Clone)]
pub struct ExpenseService {
    expenses: Arc<dyn ExpenseRepository>,
}

impl ExpenseService {
    pub fn new(expenses: Arc<dyn ExpenseRepository>) -> Self {
        Self { expenses }
    }

    pub async fn create(&self, caller: i32, owner: i32, fields: ExpenseFields) -> Result<Expense, ExpenseError> {
        if owner != caller {
            return Err(ExpenseError::NotOwner);
        }
        Ok(self.expenses.create(owner, &fields).await?)
    }

    pub async fn list(&self, caller: i32, owner: i32) -> Result<Vec<Expense>, ExpenseError> {
        if owner != caller {
            return Err(ExpenseError::NotOwner);
        }
        Ok(self.expenses.list(owner).await?)
    }

    pub async fn update(&self, caller: i32, expense_id: i32, fields: ExpenseFields) -> Result<Expense, ExpenseError> {
        self.expenses
            .update(caller, expense_id, &fields)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))
    }

    pub async fn delete(&self, caller: i32, expense_id: i32) -> Result<(), ExpenseError> {
        if self.expenses.delete(caller, expense_id).await? {
            Ok(())
        } else {
            Err(ExpenseError::NotFound(expense_id))
        }
    }
}

/// Parse a positive integer id from a path segment.
pub fn parse_path_id(raw: &str, message: &str) -> Result<i32, ExpenseError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ExpenseError::Validation(message.to_string())),
    }
}

/// Parse a positive integer id given as a JSON number or numeric string.
pub fn parse_body_id(value: &Value, message: &str) -> Result<i32, ExpenseError> {
    let id = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ExpenseError::Validation(message.to_string())),
    }
}

/// Validate the four editable columns. Any missing or blank field fails with
/// the same message; malformed values get a specific one.
pub fn build_fields(
    amount: Option<&Value>,
    description: Option<&str>,
    category: Option<&str>,
    date: Option<&str>,
) -> Result<ExpenseFields, ExpenseError> {
    let required = || ExpenseError::Validation("All fields are required".to_string());

    let amount = amount.filter(|v| !v.is_null()).ok_or_else(required)?;
    let description = non_blank(description).ok_or_else(required)?;
    let category = non_blank(category).ok_or_else(required)?;
    let date = non_blank(date).ok_or_else(required)?;

    if category.chars().count() > MAX_CATEGORY_CHARS {
        return Err(ExpenseError::Validation(format!(
            "Category must be at most {} characters",
            MAX_CATEGORY_CHARS
        )));
    }

    Ok(ExpenseFields {
        amount: parse_amount(amount)?,
        description,
        category,
        expense_date: parse_date(&date)?,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_amount(value: &Value) -> Result<Decimal, ExpenseError> {
    let invalid = || ExpenseError::Validation("Amount must be a positive number".to_string());

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid()),
    };

    let mut amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Same rounding and scale as a NUMERIC(12,2) column, so every store renders "12.50".
    amount.rescale(2);

    if amount <= Decimal::ZERO {
        return Err(invalid());
    }
    if amount >= Decimal::new(MAX_AMOUNT_UNITS, 0) {
        return Err(ExpenseError::Validation("Amount is too large".to_string()));
    }
    Ok(amount)
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part kept).
fn parse_date(value: &str) -> Result<NaiveDate, ExpenseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ExpenseError::Validation("Date must be in YYYY-MM-DD format".to_string()))
}
