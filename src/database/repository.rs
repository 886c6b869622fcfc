use async_trait::async_trait;

use super::models::{Expense, ExpenseFields, User, UserSummary};
use super::DatabaseError;

/// Account storage. The store itself enforces name uniqueness: `insert`
/// fails with `DatabaseError::UniqueViolation` for a taken name even when a
/// concurrent caller passed the same pre-insert lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError>;

    async fn insert(&self, name: &str, password_hash: &str) -> Result<UserSummary, DatabaseError>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Expense storage. Every operation is scoped by owner id; a record that
/// exists but belongs to someone else is indistinguishable from a missing one.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn create(&self, owner_id: i32, fields: &ExpenseFields) -> Result<Expense, DatabaseError>;

    /// Newest first
    async fn list(&self, owner_id: i32) -> Result<Vec<Expense>, DatabaseError>;

    async fn update(
        &self,
        owner_id: i32,
        expense_id: i32,
        fields: &ExpenseFields,
    ) -> Result<Option<Expense>, DatabaseError>;

    /// Returns whether a row was removed
    async fn delete(&self, owner_id: i32, expense_id: i32) -> Result<bool, DatabaseError>;
}
