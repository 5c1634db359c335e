//! Checkout payload validation and total verification.
//!
//! The client sends its cart lines plus the total it displayed. The
//! server recomputes subtotal and shipping from the payload and rejects
//! any order whose claimed total disagrees: the client figure is never
//! trusted.

use serde::Deserialize;

use ferme_verte_core::Money;
use ferme_verte_core::cart::{DeliveryMethod, grand_total};
use ferme_verte_core::{ProductId, UserId};

use crate::db::orders::{NewOrder, NewOrderItem};
use crate::models::AddressSnapshot;

/// Maximum quantity accepted for a single order line.
const MAX_LINE_QUANTITY: u32 = 999;

/// Checkout request body (camelCase on the wire).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub delivery_slot: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<CheckoutItem>,
    /// Total as computed (and displayed) by the client.
    pub total: Money,
}

fn default_country() -> String {
    "France".to_string()
}

/// One cart line as submitted at checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

/// Why a checkout payload was rejected.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("order must contain at least one item")]
    EmptyOrder,

    #[error("invalid quantity for \"{0}\"")]
    InvalidQuantity(String),

    #[error("invalid price for \"{0}\"")]
    InvalidPrice(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("address is required for delivery orders")]
    MissingAddress,

    #[error("order total does not match its items")]
    TotalMismatch,

    #[error("order total overflows")]
    Overflow,
}

/// Validate a checkout payload and build the order to persist.
///
/// Recomputes subtotal and shipping from the submitted lines; the
/// payload's `total` must match exactly.
///
/// # Errors
///
/// Returns a [`CheckoutError`] describing the first failed check.
pub fn build_order(
    payload: CheckoutPayload,
    user_id: Option<UserId>,
) -> Result<NewOrder, CheckoutError> {
    if payload.items.is_empty() {
        return Err(CheckoutError::EmptyOrder);
    }
    if payload.name.trim().is_empty() {
        return Err(CheckoutError::MissingField("name"));
    }
    if payload.email.trim().is_empty() {
        return Err(CheckoutError::MissingField("email"));
    }
    if payload.phone.trim().is_empty() {
        return Err(CheckoutError::MissingField("phone"));
    }
    if payload.delivery_method == DeliveryMethod::Delivery
        && (payload.line1.trim().is_empty()
            || payload.city.trim().is_empty()
            || payload.zip.trim().is_empty())
    {
        return Err(CheckoutError::MissingAddress);
    }

    let mut subtotal = Money::ZERO;
    let mut items = Vec::with_capacity(payload.items.len());
    for item in payload.items {
        if item.quantity == 0 || item.quantity > MAX_LINE_QUANTITY {
            return Err(CheckoutError::InvalidQuantity(item.name));
        }
        if item.price < Money::ZERO {
            return Err(CheckoutError::InvalidPrice(item.name));
        }
        let line_total = item
            .price
            .checked_mul(item.quantity)
            .ok_or(CheckoutError::Overflow)?;
        subtotal += line_total;

        items.push(NewOrderItem {
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        });
    }

    let total = grand_total(subtotal, payload.delivery_method);
    if total != payload.total {
        return Err(CheckoutError::TotalMismatch);
    }

    Ok(NewOrder {
        user_id,
        address_snapshot: AddressSnapshot {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            line1: payload.line1,
            line2: payload.line2,
            city: payload.city,
            zip: payload.zip,
            country: payload.country,
        },
        total,
        delivery_method: payload.delivery_method,
        delivery_slot: payload.delivery_slot,
        notes: payload.notes,
        items,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn item(price_cents: i64, quantity: u32) -> CheckoutItem {
        CheckoutItem {
            product_id: ProductId::from("prod-botte"),
            name: "Botte d'asperges vertes".to_string(),
            price: Money::from_cents(price_cents),
            quantity,
        }
    }

    fn payload(items: Vec<CheckoutItem>, total_cents: i64) -> CheckoutPayload {
        CheckoutPayload {
            name: "Claire Morel".to_string(),
            email: "claire@example.fr".to_string(),
            phone: "0612345678".to_string(),
            delivery_method: DeliveryMethod::Delivery,
            line1: "12 rue des Maraîchers".to_string(),
            line2: String::new(),
            city: "Blaye".to_string(),
            zip: "33390".to_string(),
            country: "France".to_string(),
            delivery_slot: Some("morning".to_string()),
            notes: None,
            items,
            total: Money::from_cents(total_cents),
        }
    }

    #[test]
    fn accepts_matching_total_with_delivery_fee() {
        // 2 x 8.50 = 17.00, under threshold, + 5.90 shipping
        let order = build_order(payload(vec![item(8_50, 2)], 22_90), None).unwrap();
        assert_eq!(order.total, Money::from_cents(22_90));
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn accepts_free_shipping_at_threshold() {
        // 50.00 exactly: shipping is free, total equals subtotal
        let order = build_order(payload(vec![item(25_00, 2)], 50_00), None).unwrap();
        assert_eq!(order.total, Money::from_cents(50_00));
    }

    #[test]
    fn rejects_mismatched_total() {
        // Client claims free shipping it did not earn
        let err = build_order(payload(vec![item(8_50, 2)], 17_00), None).unwrap_err();
        assert!(matches!(err, CheckoutError::TotalMismatch));
    }

    #[test]
    fn rejects_empty_order() {
        let err = build_order(payload(vec![], 5_90), None).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyOrder));
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = build_order(payload(vec![item(8_50, 0)], 5_90), None).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidQuantity(_)));
    }

    #[test]
    fn rejects_delivery_without_address() {
        let mut p = payload(vec![item(8_50, 2)], 22_90);
        p.line1 = String::new();
        let err = build_order(p, None).unwrap_err();
        assert!(matches!(err, CheckoutError::MissingAddress));
    }

    #[test]
    fn pickup_needs_no_address_and_no_fee() {
        let mut p = payload(vec![item(8_50, 2)], 17_00);
        p.delivery_method = DeliveryMethod::Pickup;
        p.line1 = String::new();
        p.city = String::new();
        p.zip = String::new();
        let order = build_order(p, None).unwrap();
        assert_eq!(order.total, Money::from_cents(17_00));
    }
}
