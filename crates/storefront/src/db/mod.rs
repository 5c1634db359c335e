//! Database operations for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `users` - Customer accounts (argon2 password hashes)
//! - `sessions` - tower-sessions storage
//! - `addresses` - Saved delivery addresses
//! - `products` / `inventory_lots` - Catalog and harvest stock
//! - `orders` / `order_items` - Orders with name/price snapshots
//! - `subscription_plans` / `subscriptions` - Weekly asparagus baskets
//! - `preorder_requests` - Seasonal pre-order form submissions
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p ferme-verte-cli -- migrate
//! ```
//!
//! Queries use the runtime sqlx API (`query`/`query_as`) rather than the
//! compile-time macros, so building the workspace does not require a live
//! database.

pub mod addresses;
pub mod orders;
pub mod preorders;
pub mod products;
pub mod subscriptions;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Generate a fresh entity ID (UUID v4 string).
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
