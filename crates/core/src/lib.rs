//! Ferme Verte Core - Shared types and cart domain.
//!
//! This crate provides the types used across all Ferme Verte components:
//! - `storefront` - Public JSON API server
//! - `cli` - Command-line tools (migrations, seeding, terminal shop client)
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. The one deliberate exception is the [`cart`]
//! module's `CartStorage` trait, which abstracts over whatever durable
//! local storage the embedding client provides.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses
//! - [`cart`] - The client-local cart store and the shipping/total policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;
