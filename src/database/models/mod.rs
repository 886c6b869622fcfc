pub mod expense;
pub mod user;

pub use expense::{Expense, ExpenseFields};
pub use user::{User, UserSummary};
