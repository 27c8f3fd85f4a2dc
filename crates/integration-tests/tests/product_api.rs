//! Integration tests for the product endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p sundry-api)
//!
//! Run with: cargo test -p sundry-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("SUNDRY_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Test helper: create a product and return its JSON body.
async fn create_test_product(client: &Client, name: &str, price: i32, stock: i32) -> Value {
    let resp = client
        .post(format!("{}/product", base_url()))
        .json(&json!({
            "productName": name,
            "productPrice": price,
            "productStock": stock,
            "note": "integration test",
        }))
        .send()
        .await
        .expect("Failed to create test product");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid create product response")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn create_product_returns_created_fields() {
    let client = Client::new();

    let body = create_test_product(&client, "jasmine tea", 130, 25).await;

    assert!(body["productId"].is_i64());
    assert_eq!(body["productName"], "jasmine tea");
    assert_eq!(body["productPrice"], 130);
    assert_eq!(body["productStock"], 25);
    assert_eq!(body["productSales"], 0);
    assert_eq!(body["note"], "integration test");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn create_product_without_name_is_rejected() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/product", base_url()))
        .json(&json!({"productPrice": 100, "productStock": 10}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "product name is required");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn create_product_with_negative_price_is_rejected() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/product", base_url()))
        .json(&json!({"productName": "bad", "productPrice": -1, "productStock": 10}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "product price must not be negative");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn read_product_returns_matching_fields() {
    let client = Client::new();
    let created = create_test_product(&client, "sencha", 140, 30).await;
    let product_id = created["productId"].as_i64().expect("Missing productId");

    let resp = client
        .get(format!("{}/product/{product_id}", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid product response");
    assert_eq!(body["productId"], product_id);
    assert_eq!(body["productName"], "sencha");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn read_missing_product_is_not_found() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/product/2000000000", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["message"], "product not found");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn update_product_changes_fields() {
    let client = Client::new();
    let created = create_test_product(&client, "matcha", 300, 15).await;
    let product_id = created["productId"].as_i64().expect("Missing productId");

    let resp = client
        .put(format!("{}/product/{product_id}", base_url()))
        .json(&json!({
            "productName": "matcha deluxe",
            "productPrice": 350,
            "productStock": 10,
            "note": "restocked",
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid success body");
    assert_eq!(body["success"], true);

    let resp = client
        .get(format!("{}/product/{product_id}", base_url()))
        .send()
        .await
        .expect("Request failed");
    let body: Value = resp.json().await.expect("Invalid product response");
    assert_eq!(body["productName"], "matcha deluxe");
    assert_eq!(body["productPrice"], 350);
    assert_eq!(body["productStock"], 10);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn update_missing_product_is_not_found() {
    let client = Client::new();

    let resp = client
        .put(format!("{}/product/2000000000", base_url()))
        .json(&json!({"productName": "ghost", "productPrice": 1, "productStock": 1}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn delete_product_succeeds_once() {
    let client = Client::new();
    let created = create_test_product(&client, "hojicha", 125, 20).await;
    let product_id = created["productId"].as_i64().expect("Missing productId");

    let resp = client
        .delete(format!("{}/product/{product_id}", base_url()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid success body");
    assert_eq!(body["success"], true);

    let resp = client
        .delete(format!("{}/product/{product_id}", base_url()))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
