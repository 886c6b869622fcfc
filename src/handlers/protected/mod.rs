// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here runs behind jwt_auth_middleware and receives the
// caller's identity as Extension<AuthUser>.

pub mod expense;
