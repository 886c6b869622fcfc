pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

use thiserror::Error;

pub use manager::DatabaseManager;
pub use memory::{InMemoryExpenseRepository, InMemoryUserRepository};
pub use models::{Expense, ExpenseFields, User, UserSummary};
pub use postgres::{PgExpenseRepository, PgUserRepository};
pub use repository::{ExpenseRepository, UserRepository};

/// Errors from the record and credential stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::UniqueViolation(db.message().to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}
