// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition: account registration and login.

pub mod auth;
