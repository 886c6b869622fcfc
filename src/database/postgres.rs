use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Expense, ExpenseFields, User, UserSummary};
use super::repository::{ExpenseRepository, UserRepository};
use super::DatabaseError;

const EXPENSE_COLUMNS: &str =
    "id, user_id, amount, description, category, expense_date, created_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password, create_dt FROM users WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, name: &str, password_hash: &str) -> Result<UserSummary, DatabaseError> {
        let user = sqlx::query_as::<_, UserSummary>(
            "INSERT INTO users (name, password) VALUES ($1, $2) RETURNING id, name, create_dt",
        )
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn create(&self, owner_id: i32, fields: &ExpenseFields) -> Result<Expense, DatabaseError> {
        let query = format!(
            "INSERT INTO expenses (user_id, amount, description, category, expense_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            EXPENSE_COLUMNS
        );

        let expense = sqlx::query_as::<_, Expense>(&query)
            .bind(owner_id)
            .bind(fields.amount)
            .bind(&fields.description)
            .bind(&fields.category)
            .bind(fields.expense_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(expense)
    }

    async fn list(&self, owner_id: i32) -> Result<Vec<Expense>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM expenses WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            EXPENSE_COLUMNS
        );

        let expenses = sqlx::query_as::<_, Expense>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(expenses)
    }

    async fn update(
        &self,
        owner_id: i32,
        expense_id: i32,
        fields: &ExpenseFields,
    ) -> Result<Option<Expense>, DatabaseError> {
        let query = format!(
            "UPDATE expenses \
             SET amount = $1, description = $2, category = $3, expense_date = $4 \
             WHERE id = $5 AND user_id = $6 RETURNING {}",
            EXPENSE_COLUMNS
        );

        let expense = sqlx::query_as::<_, Expense>(&query)
            .bind(fields.amount)
            .bind(&fields.description)
            .bind(&fields.category)
            .bind(fields.expense_date)
            .bind(expense_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(expense)
    }

    async fn delete(&self, owner_id: i32, expense_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(expense_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
