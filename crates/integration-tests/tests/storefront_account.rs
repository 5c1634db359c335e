//! Integration tests for accounts: registration, login, and the
//! account-scoped endpoints (orders, addresses, subscriptions).
//!
//! These tests require:
//! - A running `PostgreSQL` database, migrated and seeded
//! - The storefront server running (cargo run -p ferme-verte-storefront)
//!
//! Run with: cargo test -p ferme-verte-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with its own cookie jar (one session per test).
fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a throwaway account and return its email.
async fn register(client: &Client) -> String {
    let email = format!("test-{}@example.fr", Uuid::new_v4());
    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({
            "name": "Client Test",
            "email": email,
            "password": "User123!",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);
    email
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_register_login_and_me() {
    let client = session_client();
    let email = register(&client).await;

    // Registration logs the session in
    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get me");
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = resp.json().await.expect("Failed to parse me");
    assert_eq!(me["user"]["email"], email.as_str());

    // Logout drops it
    let resp = client
        .post(format!("{}/api/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to get me");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // And login brings it back
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "email": email, "password": "User123!" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_duplicate_registration_is_conflict() {
    let client = session_client();
    let email = register(&client).await;

    let resp = session_client()
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({
            "name": "Client Test",
            "email": email,
            "password": "User123!",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_wrong_password_is_unauthorized() {
    let client = session_client();
    let email = register(&client).await;

    let resp = session_client()
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_orders_are_scoped_to_the_account() {
    let client = session_client();
    register(&client).await;

    // Place an order while logged in
    let product: Value = client
        .get(format!("{}/api/products/asperges-vertes-1kg", base_url()))
        .send()
        .await
        .expect("Failed to get product")
        .json()
        .await
        .expect("Failed to parse product");

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({
            "name": "Client Test",
            "email": "client@example.fr",
            "phone": "0612345678",
            "deliveryMethod": "pickup",
            "items": [{
                "productId": product["id"],
                "name": product["name"],
                "price": product["price"],
                "quantity": 1,
            }],
            "total": product["price"],
        }))
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");
    let order_id = order["id"].as_str().expect("order id").to_string();

    // Visible in this account's history
    let orders: Vec<Value> = client
        .get(format!("{}/api/orders", base_url()))
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to parse orders");
    assert!(orders.iter().any(|o| o["id"] == order_id.as_str()));

    // Invisible to a different account
    let other = session_client();
    register(&other).await;
    let resp = other
        .get(format!("{}/api/orders/{order_id}", base_url()))
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_default_address_replaces_previous_default() {
    let client = session_client();
    register(&client).await;

    for line1 in ["1 rue du Port", "2 rue du Port"] {
        let resp = client
            .post(format!("{}/api/addresses", base_url()))
            .json(&json!({
                "line1": line1,
                "city": "Blaye",
                "zip": "33390",
                "phone": "0612345678",
                "isDefault": true,
            }))
            .send()
            .await
            .expect("Failed to create address");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let addresses: Vec<Value> = client
        .get(format!("{}/api/addresses", base_url()))
        .send()
        .await
        .expect("Failed to list addresses")
        .json()
        .await
        .expect("Failed to parse addresses");

    let defaults = addresses
        .iter()
        .filter(|a| a["isDefault"] == Value::Bool(true))
        .count();
    assert_eq!(defaults, 1, "only the newest default survives");
    assert_eq!(addresses[0]["line1"], "2 rue du Port");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_second_active_subscription_is_rejected() {
    let client = session_client();
    register(&client).await;

    let plans: Vec<Value> = client
        .get(format!("{}/api/plans", base_url()))
        .send()
        .await
        .expect("Failed to list plans")
        .json()
        .await
        .expect("Failed to parse plans");
    let plan_id = plans[0]["id"].as_str().expect("plan id");

    let resp = client
        .post(format!("{}/api/subscriptions", base_url()))
        .json(&json!({ "planId": plan_id }))
        .send()
        .await
        .expect("Failed to subscribe");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{}/api/subscriptions", base_url()))
        .json(&json!({ "planId": plan_id }))
        .send()
        .await
        .expect("Failed to subscribe");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
