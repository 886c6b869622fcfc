// handlers/public/auth/mod.rs - Account registration and login

pub mod login;    // POST /auth/login - verify credentials and get JWT
pub mod register; // POST /auth/register - create new account

pub use login::login;
pub use register::register;
