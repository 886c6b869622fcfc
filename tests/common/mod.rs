#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use expense_tracker_api::auth::{PasswordHasher, TokenIssuer};
use expense_tracker_api::database::{InMemoryExpenseRepository, InMemoryUserRepository};
use expense_tracker_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const HOUR: Duration = Duration::from_secs(3600);

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Full router over in-memory stores. bcrypt runs at its minimum cost.
pub fn test_app() -> TestApp {
    let tokens = TokenIssuer::new(SECRET, HOUR).expect("token issuer");
    let state = AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryExpenseRepository::new()),
        tokens,
        PasswordHasher::new(4),
    );
    let router = app(state.clone(), &["http://localhost:5173".to_string()]);
    TestApp { router, state }
}

impl TestApp {
    /// Send a request and return the status plus the body parsed as JSON
    /// (non-JSON bodies come back as a JSON string).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read response body")?;

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        Ok((status, body))
    }

    pub async fn register(&self, name: &str, password: &str) -> Result<(StatusCode, Value)> {
        self.send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "name": name, "password": password, "confirmPassword": password })),
        )
        .await
    }

    pub async fn login(&self, name: &str, password: &str) -> Result<(StatusCode, Value)> {
        self.send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "name": name, "password": password })),
        )
        .await
    }

    /// Register and log in, returning the account id and a bearer token
    pub async fn signed_in(&self, name: &str, password: &str) -> Result<(i64, String)> {
        let (status, body) = self.register(name, password).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);

        let (status, body) = self.login(name, password).await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);

        let id = body["user"]["id"].as_i64().context("missing user id")?;
        let token = body["token"].as_str().context("missing token")?.to_string();
        Ok((id, token))
    }
}

pub fn expense(user_id: i64, description: &str) -> Value {
    json!({
        "user_id": user_id,
        "amount": 12.5,
        "description": description,
        "category": "Food",
        "date": "2024-03-01"
    })
}
