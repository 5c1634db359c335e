//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod shop;

use secrecy::SecretString;

/// Read the database URL from the environment.
///
/// Prefers `STOREFRONT_DATABASE_URL`, falls back to `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, MissingEnvVar> {
    dotenvy::dotenv().ok();
    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MissingEnvVar("STOREFRONT_DATABASE_URL"))
}

/// A required environment variable was not set.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVar(&'static str);
