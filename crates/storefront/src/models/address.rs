//! Saved delivery address model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ferme_verte_core::{AddressId, UserId};

/// A saved delivery address belonging to a user.
///
/// At most one address per user is the default; setting a new default
/// unsets the previous one.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}
