//! Integration tests for Ferme Verte.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and seed a database, then start the storefront
//! cargo run -p ferme-verte-cli -- migrate
//! cargo run -p ferme-verte-cli -- seed
//! cargo run -p ferme-verte-storefront
//!
//! # Run the (ignored) integration tests against it
//! cargo test -p ferme-verte-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog listing and detail endpoints
//! - `storefront_checkout` - Guest checkout and total verification
//! - `storefront_account` - Registration, login, and account-scoped data
//!
//! The base URL defaults to `http://localhost:3000` and can be changed
//! with `STOREFRONT_BASE_URL`.
