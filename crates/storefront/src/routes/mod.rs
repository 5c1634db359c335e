//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (pings the database)
//!
//! # Catalog
//! GET    /api/products            - Product listing with stock (?active=false for all)
//! GET    /api/products/{slug}     - Product detail
//!
//! # Auth
//! POST   /api/auth/register       - Create an account and log in
//! POST   /api/auth/login          - Log in
//! POST   /api/auth/logout         - Log out
//! GET    /api/auth/me             - Current user
//!
//! # Orders
//! POST   /api/orders              - Checkout (guest-capable)
//! GET    /api/orders              - Order history (auth)
//! GET    /api/orders/{id}         - Order detail (auth, scoped)
//!
//! # Addresses (auth)
//! GET    /api/addresses           - Saved addresses
//! POST   /api/addresses           - Save an address
//! DELETE /api/addresses/{id}      - Delete an address
//!
//! # Subscriptions
//! GET    /api/plans               - Active weekly basket plans
//! GET    /api/subscriptions       - The user's subscriptions (auth)
//! POST   /api/subscriptions       - Subscribe to a plan (auth)
//!
//! # Preorders
//! POST   /api/preorders           - Seasonal preorder request
//! ```

pub mod addresses;
pub mod auth;
pub mod orders;
pub mod preorders;
pub mod products;
pub mod subscriptions;

use axum::{
    Json,
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::json;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::index).post(addresses::create))
        .route("/{id}", axum::routing::delete(addresses::delete))
}

/// Create the subscription routes router.
pub fn subscription_routes() -> Router<AppState> {
    Router::new().route("/", get(subscriptions::index).post(subscriptions::create))
}

/// Liveness check.
async fn health() -> &'static str {
    "OK"
}

/// Readiness check; verifies the database answers.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/api/products", product_routes())
        .nest("/api/auth", auth_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/addresses", address_routes())
        .nest("/api/subscriptions", subscription_routes())
        .route("/api/plans", get(subscriptions::plans))
        .route("/api/preorders", post(preorders::create))
}
