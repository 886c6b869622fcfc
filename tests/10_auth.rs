mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn register_returns_account_summary() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app.register("alice", "secret123").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User Registered Successfully!");
    assert_eq!(body["user"]["name"], "alice");
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"]["create_dt"].is_string());
    assert!(body["user"].get("password").is_none(), "hash leaked: {}", body);
    Ok(())
}

#[tokio::test]
async fn register_validates_input() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app
        .send(Method::POST, "/auth/register", None, Some(json!({ "name": "alice" })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and password are required");
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "name": "alice", "password": "a", "confirmPassword": "b" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passwords do not match");

    let (status, body) = app.register(&"n".repeat(256), "secret123").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name must be at most 255 characters");
    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_name() -> Result<()> {
    let app = common::test_app();

    let (status, _) = app.register("alice", "secret123").await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.register("alice", "different").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn concurrent_duplicate_registrations_create_one_account() -> Result<()> {
    let app = common::test_app();

    let (a, b) = tokio::join!(app.register("alice", "pw-one"), app.register("alice", "pw-two"));
    let mut statuses = vec![a?.0, b?.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let app = common::test_app();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let (status, body) = app.send_request(request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn login_issues_token_for_registered_identity() -> Result<()> {
    let app = common::test_app();
    let (_, registered) = app.register("alice", "secret123").await?;

    let (status, body) = app.login("alice", "secret123").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user"], registered["user"]);
    assert!(body["user"].get("password").is_none(), "hash leaked: {}", body);

    let claims = app.state.tokens.verify(body["token"].as_str().unwrap())?;
    assert_eq!(i64::from(claims.id), registered["user"]["id"].as_i64().unwrap());
    assert_eq!(claims.name, "alice");
    assert_eq!(claims.exp - claims.iat, 3600);
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let app = common::test_app();
    app.register("alice", "secret123").await?;

    let wrong_password = app.login("alice", "secret123x").await?;
    let unknown_user = app.login("bob", "secret123").await?;

    assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password.1["error"], "Invalid username or password");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app
        .send(Method::POST, "/auth/login", None, Some(json!({ "password": "x" })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}
