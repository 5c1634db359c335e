//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - User registration and login (argon2 password hashes)
//! - `checkout` - Order payload validation and total verification

pub mod auth;
pub mod checkout;
