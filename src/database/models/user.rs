use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Full `users` row. Deliberately not `Serialize`: the password hash must
/// never reach a response body.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub password: String,
    pub create_dt: DateTime<Utc>,
}

/// Client-facing account view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub create_dt: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            create_dt: user.create_dt,
        }
    }
}
