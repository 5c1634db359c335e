//! Catalog product models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ferme_verte_core::{Money, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL slug, unique.
    pub slug: String,
    pub description: String,
    /// Price per sales unit.
    pub price: Money,
    /// Sales unit label ("botte", "kg", "caisse").
    pub unit: String,
    /// Image paths, display order.
    pub images: Vec<String>,
    pub tags: Vec<String>,
    /// Inactive products are hidden from the shop.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A product with its live stock figure.
///
/// `total_stock` is the sum of available quantities over the product's
/// inventory lots; it is advisory for the shop page, not a reservation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithStock {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub product: Product,
    pub total_stock: i64,
}
