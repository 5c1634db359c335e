//! Order models.
//!
//! Orders snapshot everything they need at creation time: the contact and
//! address fields (as a JSON document) and each item's name and price.
//! Later catalog or account edits never change what an order says.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferme_verte_core::cart::DeliveryMethod;
use ferme_verte_core::{Money, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// Contact and address fields captured at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSnapshot {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// `None` for guest checkout.
    pub user_id: Option<UserId>,
    pub address_snapshot: AddressSnapshot,
    /// Grand total (subtotal + shipping), verified server-side.
    pub total: Money,
    pub status: OrderStatus,
    pub delivery_method: DeliveryMethod,
    /// Chosen delivery window ("morning", "afternoon", "evening").
    pub delivery_slot: Option<String>,
    pub notes: Option<String>,
    /// Always "cash_on_delivery" today.
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

/// One item of an order, with name and price frozen at checkout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    /// `None` once the product has been deleted from the catalog.
    pub product_id: Option<ProductId>,
    pub name_snapshot: String,
    pub price_snapshot: Money,
    pub quantity: i32,
}

/// An order together with its items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
