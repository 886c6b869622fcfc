// handlers/mod.rs - Handler tiers
//
// public:    no authentication (/auth/*)
// protected: bearer token required (/expense/*), gated by jwt_auth_middleware

pub mod health;
pub mod protected;
pub mod public;

use axum::extract::rejection::JsonRejection;

use crate::error::ApiError;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}
