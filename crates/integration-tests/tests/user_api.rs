//! Integration tests for the user endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p sundry-api)
//!
//! Run with: cargo test -p sundry-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("SUNDRY_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A user name that no earlier test run has used.
fn unique_name() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    // Column limit is 20 chars
    format!("u-{}", &suffix[..12])
}

/// Test helper: create a user and return its JSON body.
async fn create_test_user(client: &Client, name: &str) -> Value {
    let resp = client
        .post(format!("{}/user", base_url()))
        .json(&json!({
            "userName": name,
            "userPassword": "password-test",
            "adminPermission": 1,
        }))
        .send()
        .await
        .expect("Failed to create test user");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid create user response")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn create_user_returns_created_fields() {
    let client = Client::new();
    let name = unique_name();

    let body = create_test_user(&client, &name).await;

    assert!(body["userId"].is_i64());
    assert_eq!(body["userName"], name.as_str());
    assert_eq!(body["adminPermission"], 1);
    // Password material never appears on the wire
    assert!(body.get("userPassword").is_none());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn duplicate_user_name_is_a_conflict() {
    let client = Client::new();
    let name = unique_name();
    create_test_user(&client, &name).await;

    let resp = client
        .post(format!("{}/user", base_url()))
        .json(&json!({
            "userName": name,
            "userPassword": "password-test",
            "adminPermission": 1,
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "user name already exists");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn missing_user_name_is_rejected() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/user", base_url()))
        .json(&json!({
            "userPassword": "password-test",
            "adminPermission": 1,
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "invalid user name: user name cannot be empty");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn login_returns_token_and_permission() {
    let client = Client::new();
    let name = unique_name();
    create_test_user(&client, &name).await;

    let resp = client
        .post(format!("{}/user/login", base_url()))
        .json(&json!({
            "userName": name,
            "userPassword": "password-test",
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid login response");
    assert!(body["token"].is_string());
    assert_eq!(body["adminPermission"], 1);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn login_with_wrong_credentials_is_unauthorized() {
    let client = Client::new();
    let name = unique_name();
    create_test_user(&client, &name).await;

    let resp = client
        .post(format!("{}/user/login", base_url()))
        .json(&json!({
            "userName": name,
            "userPassword": "wrong-password",
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "invalid user name or password");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn read_user_returns_matching_fields() {
    let client = Client::new();
    let name = unique_name();
    let created = create_test_user(&client, &name).await;
    let user_id = created["userId"].as_i64().expect("Missing userId");

    let resp = client
        .get(format!("{}/user/{user_id}", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid user response");
    assert_eq!(body["userId"], user_id);
    assert_eq!(body["userName"], name.as_str());
    assert_eq!(body["adminPermission"], 1);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn read_missing_user_is_not_found() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/user/2000000000", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "user not found");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn list_users_includes_created_user() {
    let client = Client::new();
    let name = unique_name();
    let created = create_test_user(&client, &name).await;
    let user_id = created["userId"].as_i64().expect("Missing userId");

    let resp = client
        .get(format!("{}/user", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid list response");
    let users = body.as_array().expect("Expected an array");
    assert!(users.iter().any(|u| u["userId"] == user_id));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn update_user_succeeds_and_renames() {
    let client = Client::new();
    let name = unique_name();
    let created = create_test_user(&client, &name).await;
    let user_id = created["userId"].as_i64().expect("Missing userId");
    let new_name = unique_name();

    let resp = client
        .put(format!("{}/user/{user_id}", base_url()))
        .json(&json!({
            "userName": new_name,
            "userPassword": "password-test-update",
            "adminPermission": 0,
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid success body");
    assert_eq!(body["success"], true);

    // The new credentials work, the old name is gone
    let resp = client
        .post(format!("{}/user/login", base_url()))
        .json(&json!({
            "userName": new_name,
            "userPassword": "password-test-update",
        }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn update_missing_user_is_not_found() {
    let client = Client::new();

    let resp = client
        .put(format!("{}/user/2000000000", base_url()))
        .json(&json!({
            "userName": unique_name(),
            "userPassword": "pw",
            "adminPermission": 0,
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "user not found");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn delete_user_succeeds_once() {
    let client = Client::new();
    let name = unique_name();
    let created = create_test_user(&client, &name).await;
    let user_id = created["userId"].as_i64().expect("Missing userId");

    let resp = client
        .delete(format!("{}/user/{user_id}", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid success body");
    assert_eq!(body["success"], true);

    // A second delete finds nothing
    let resp = client
        .delete(format!("{}/user/{user_id}", base_url()))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
