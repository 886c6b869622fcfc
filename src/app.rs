use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{Html, IntoResponse},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{PasswordHasher, TokenError, TokenIssuer};
use crate::config::{AppConfig, TOKEN_LIFETIME};
use crate::database::{ExpenseRepository, PgExpenseRepository, PgUserRepository, UserRepository};
use crate::handlers::{health::health, protected::expense, public::auth};
use crate::middleware::jwt_auth_middleware;
use crate::services::{AuthService, ExpenseService};

/// Shared, read-only application state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub expenses: ExpenseService,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        expenses: Arc<dyn ExpenseRepository>,
        tokens: TokenIssuer,
        hasher: PasswordHasher,
    ) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            auth: AuthService::new(users, hasher, tokens.clone()),
            expenses: ExpenseService::new(expenses),
            tokens,
        }
    }

    /// Postgres-backed state for the server binary
    pub fn from_config(config: &AppConfig, pool: PgPool) -> Result<Self, TokenError> {
        let tokens = TokenIssuer::new(&config.security.jwt_secret, TOKEN_LIFETIME)?;

        Ok(Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgExpenseRepository::new(pool)),
            tokens,
            PasswordHasher::new(config.security.bcrypt_cost),
        ))
    }
}

pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/expense", expense_routes(state.clone()))
        .fallback(not_found)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register).fallback(not_found))
        .route("/login", post(auth::login).fallback(not_found))
}

fn expense_routes(state: AppState) -> Router<AppState> {
    // Gate each method router rather than the whole nest: a wrong method on a
    // known path reaches the 404 fallback without a token.
    let gate = middleware::from_fn_with_state(state, jwt_auth_middleware);

    Router::new()
        .route(
            "/add-expense",
            post(expense::add_expense)
                .route_layer(gate.clone())
                .fallback(not_found),
        )
        .route(
            "/get-expenses/:user_id",
            get(expense::get_expenses)
                .route_layer(gate.clone())
                .fallback(not_found),
        )
        .route(
            "/edit-expense/:expenseId",
            put(expense::edit_expense)
                .route_layer(gate.clone())
                .fallback(not_found),
        )
        .route(
            "/delete-expense/:expenseId",
            delete(expense::delete_expense)
                .route_layer(gate)
                .fallback(not_found),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<h1>Not Found</h1>"))
}
