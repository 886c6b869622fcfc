mod common;

use anyhow::{Context, Result};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn register_login_and_track_expenses() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app.register("alice", "secret123").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User Registered Successfully!");
    let user_id = body["user"]["id"].as_i64().context("user id")?;

    let (status, body) = app.login("alice", "secret123").await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().context("token")?.to_string();

    let lunch = json!({
        "user_id": user_id,
        "amount": 12.5,
        "description": "Lunch",
        "category": "Food",
        "date": "2024-03-01"
    });

    let (status, _) = app
        .send(Method::POST, "/expense/add-expense", None, Some(lunch.clone()))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::POST, "/expense/add-expense", Some(&token), Some(lunch))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let lunch_id = body["expense"]["id"].as_i64().context("expense id")?;

    let (status, body) = app
        .send(Method::POST, "/expense/add-expense", Some(&token), Some(common::expense(user_id, "Taxi")))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let taxi_id = body["expense"]["id"].as_i64().context("expense id")?;

    let (status, body) = app
        .send(Method::GET, &format!("/expense/get-expenses/{}", user_id), Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["expenses"]
        .as_array()
        .context("expenses array")?
        .iter()
        .filter_map(|e| e["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![taxi_id, lunch_id]);
    assert_eq!(body["expenses"][1]["amount"], "12.50");
    assert_eq!(body["expenses"][1]["expense_date"], "2024-03-01");

    let (status, _) = app
        .send(Method::DELETE, &format!("/expense/delete-expense/{}", taxi_id), Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .send(Method::GET, &format!("/expense/get-expenses/{}", user_id), Some(&token), None)
        .await?;
    assert_eq!(body["expenses"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn unknown_paths_return_html_not_found() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app.send(Method::GET, "/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>Not Found</h1>");

    // Unmatched paths under the protected prefix skip the gate.
    let (status, body) = app.send(Method::GET, "/expense/unknown", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>Not Found</h1>");
    Ok(())
}

#[tokio::test]
async fn wrong_method_on_known_path_is_not_found() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app.send(Method::GET, "/auth/login", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>Not Found</h1>");

    // The gate only guards the registered method.
    let (status, body) = app.send(Method::GET, "/expense/add-expense", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>Not Found</h1>");

    let (status, body) = app
        .send(Method::POST, "/expense/delete-expense/1", None, None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>Not Found</h1>");

    let (status, _) = app
        .send(Method::DELETE, "/expense/delete-expense/1", None, None)
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn health_reports_store_status() -> Result<()> {
    let app = common::test_app();

    let (status, body) = app.send(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["timestamp"].is_string());
    Ok(())
}
