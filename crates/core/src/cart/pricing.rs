//! Shipping fee and grand-total policy.
//!
//! Pure functions shared by every surface that shows a total: the cart
//! view, the checkout form, and the server-side order verification.

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Subtotal at or above which delivery is free (inclusive).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(50_00);

/// Flat delivery fee below the free-shipping threshold.
pub const DELIVERY_FEE: Money = Money::from_cents(5_90);

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Home delivery, charged below the free-shipping threshold.
    Delivery,
    /// Pickup at the farm, always free.
    Pickup,
}

impl DeliveryMethod {
    /// The wire name of the method (`"delivery"` / `"pickup"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Pickup => "pickup",
        }
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = UnknownDeliveryMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(Self::Delivery),
            "pickup" => Ok(Self::Pickup),
            other => Err(UnknownDeliveryMethod(other.to_owned())),
        }
    }
}

/// Error for an unrecognized delivery method name.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown delivery method: {0} (expected \"delivery\" or \"pickup\")")]
pub struct UnknownDeliveryMethod(pub String);

/// Shipping fee for a given subtotal and delivery method.
///
/// Pickup is always free. Delivery is free from
/// [`FREE_SHIPPING_THRESHOLD`] up (the threshold itself qualifies),
/// otherwise [`DELIVERY_FEE`] applies.
#[must_use]
pub fn shipping_fee(subtotal: Money, method: DeliveryMethod) -> Money {
    match method {
        DeliveryMethod::Pickup => Money::ZERO,
        DeliveryMethod::Delivery => {
            if subtotal >= FREE_SHIPPING_THRESHOLD {
                Money::ZERO
            } else {
                DELIVERY_FEE
            }
        }
    }
}

/// Subtotal plus shipping fee.
#[must_use]
pub fn grand_total(subtotal: Money, method: DeliveryMethod) -> Money {
    subtotal + shipping_fee(subtotal, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_below_threshold_charges_fee() {
        let subtotal = Money::from_cents(49_99);
        assert_eq!(
            shipping_fee(subtotal, DeliveryMethod::Delivery),
            DELIVERY_FEE
        );
        assert_eq!(
            grand_total(subtotal, DeliveryMethod::Delivery),
            Money::from_cents(55_89)
        );
    }

    #[test]
    fn test_delivery_threshold_is_inclusive() {
        let subtotal = Money::from_cents(50_00);
        assert_eq!(shipping_fee(subtotal, DeliveryMethod::Delivery), Money::ZERO);
        assert_eq!(
            grand_total(subtotal, DeliveryMethod::Delivery),
            Money::from_cents(50_00)
        );
    }

    #[test]
    fn test_pickup_is_always_free() {
        for cents in [0, 1, 49_99, 50_00, 500_00] {
            let subtotal = Money::from_cents(cents);
            assert_eq!(shipping_fee(subtotal, DeliveryMethod::Pickup), Money::ZERO);
            assert_eq!(grand_total(subtotal, DeliveryMethod::Pickup), subtotal);
        }
    }

    #[test]
    fn test_method_parse_roundtrip() {
        for method in [DeliveryMethod::Delivery, DeliveryMethod::Pickup] {
            let parsed: DeliveryMethod = method.as_str().parse().expect("parse");
            assert_eq!(parsed, method);
        }
        assert!("drone".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn test_method_wire_format() {
        let json = serde_json::to_string(&DeliveryMethod::Pickup).expect("serialize");
        assert_eq!(json, "\"pickup\"");
    }
}
