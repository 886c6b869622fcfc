pub mod auth_service;
pub mod expense_service;

pub use auth_service::{AuthError, AuthService, Credentials, LoginOutcome, Registration};
pub use expense_service::{ExpenseError, ExpenseService};
