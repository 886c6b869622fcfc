//! In-memory stores with the same contract as the Postgres ones. Used by the
//! integration tests and for running the API without a database.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::models::{Expense, ExpenseFields, User, UserSummary};
use super::repository::{ExpenseRepository, UserRepository};
use super::DatabaseError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.name == name).cloned())
    }

    async fn insert(&self, name: &str, password_hash: &str) -> Result<UserSummary, DatabaseError> {
        // Check and insert under one write lock, like a UNIQUE constraint.
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.name == name) {
            return Err(DatabaseError::UniqueViolation(format!(
                "users.name already contains {}",
                name
            )));
        }

        let user = User {
            id: users.len() as i32 + 1,
            name: name.to_string(),
            password: password_hash.to_string(),
            create_dt: Utc::now(),
        };
        users.push(user.clone());
        Ok(user.into())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExpenseRepository {
    state: RwLock<ExpenseTable>,
}

#[derive(Default)]
struct ExpenseTable {
    next_id: i32,
    rows: Vec<Expense>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn create(&self, owner_id: i32, fields: &ExpenseFields) -> Result<Expense, DatabaseError> {
        let mut state = self.state.write().await;
        state.next_id += 1;

        let expense = Expense {
            id: state.next_id,
            user_id: owner_id,
            amount: fields.amount,
            description: fields.description.clone(),
            category: fields.category.clone(),
            expense_date: fields.expense_date,
            created_at: Utc::now(),
        };
        state.rows.push(expense.clone());
        Ok(expense)
    }

    async fn list(&self, owner_id: i32) -> Result<Vec<Expense>, DatabaseError> {
        let state = self.state.read().await;
        let mut expenses: Vec<Expense> = state
            .rows
            .iter()
            .filter(|e| e.user_id == owner_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }

    async fn update(
        &self,
        owner_id: i32,
        expense_id: i32,
        fields: &ExpenseFields,
    ) -> Result<Option<Expense>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(expense) = state
            .rows
            .iter_mut()
            .find(|e| e.id == expense_id && e.user_id == owner_id)
        else {
            return Ok(None);
        };

        expense.amount = fields.amount;
        expense.description = fields.description.clone();
        expense.category = fields.category.clone();
        expense.expense_date = fields.expense_date;
        Ok(Some(expense.clone()))
    }

    async fn delete(&self, owner_id: i32, expense_id: i32) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;
        let before = state.rows.len();
        state
            .rows
            .retain(|e| !(e.id == expense_id && e.user_id == owner_id));
        Ok(state.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn fields(description: &str) -> ExpenseFields {
        ExpenseFields {
            amount: Decimal::new(1250, 2),
            description: description.to_string(),
            category: "Food".to_string(),
            expense_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn user_names_are_unique() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.insert("alice", "hash").await.unwrap();
        assert_eq!(alice.id, 1);

        let err = repo.insert("alice", "other").await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));

        let bob = repo.insert("bob", "hash").await.unwrap();
        assert_eq!(bob.id, 2);
        assert_eq!(repo.find_by_name("alice").await.unwrap().unwrap().password, "hash");
        assert!(repo.find_by_name("carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_owner_scoped_and_newest_first() {
        let repo = InMemoryExpenseRepository::new();
        let first = repo.create(1, &fields("lunch")).await.unwrap();
        let second = repo.create(1, &fields("dinner")).await.unwrap();
        repo.create(2, &fields("someone else")).await.unwrap();

        let listed = repo.list(1).await.unwrap();
        assert_eq!(listed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn mutations_require_matching_owner() {
        let repo = InMemoryExpenseRepository::new();
        let expense = repo.create(1, &fields("lunch")).await.unwrap();

        assert!(repo.update(2, expense.id, &fields("hijack")).await.unwrap().is_none());
        assert!(!repo.delete(2, expense.id).await.unwrap());

        let updated = repo.update(1, expense.id, &fields("brunch")).await.unwrap().unwrap();
        assert_eq!(updated.description, "brunch");
        assert_eq!(updated.created_at, expense.created_at);

        assert!(repo.delete(1, expense.id).await.unwrap());
        assert!(repo.list(1).await.unwrap().is_empty());
    }
}
