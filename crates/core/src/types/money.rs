//! Money as integer minor units (euro cents).
//!
//! All cart and order arithmetic happens on whole cents, so repeated
//! additions can never accumulate binary floating-point drift. Conversion
//! to and from decimal form (`rust_decimal::Decimal`) happens only at the
//! boundaries: serde, the database, and display formatting.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when converting a decimal amount to [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount does not fit in an `i64` number of cents.
    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),
}

/// An amount of money in euro cents.
///
/// ## Examples
///
/// ```
/// use ferme_verte_core::Money;
///
/// let unit_price = Money::from_cents(8_50);
/// let line_total = unit_price * 2;
/// assert_eq!(line_total, Money::from_cents(17_00));
/// assert_eq!(line_total.to_string(), "17.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Zero euros.
    pub const ZERO: Self = Self(0);

    /// Create from a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create from a decimal amount, rounding to the nearest cent
    /// (midpoint away from zero).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::OutOfRange`] if the amount does not fit in an
    /// `i64` number of cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        let rounded = amount.round_dp_with_strategy(
            2,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );
        let cents = (rounded * Decimal::ONE_HUNDRED)
            .to_i64()
            .ok_or(MoneyError::OutOfRange(amount))?;
        Ok(Self(cents))
    }

    /// The amount as a whole number of cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount as a two-decimal `Decimal`.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as i64) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * i64::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// Serde goes through Decimal so the wire format is a plain decimal amount
// ("8.50"), never a cent count. The trait calls must stay fully qualified:
// Decimal also has inherent serialize/deserialize methods (its raw 16-byte
// form) that would shadow the serde ones.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}

// SQLx support: stored as NUMERIC(10,2), converted at the boundary.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_decimal(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.to_decimal(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_exact() {
        let m = Money::from_decimal(Decimal::new(850, 2)).unwrap();
        assert_eq!(m.cents(), 850);
    }

    #[test]
    fn test_from_decimal_rounds_to_cent() {
        // 1.005 rounds away from zero to 1.01
        let m = Money::from_decimal(Decimal::new(1005, 3)).unwrap();
        assert_eq!(m.cents(), 101);
    }

    #[test]
    fn test_no_float_drift_on_repeated_addition() {
        // 0.10 added ten times is exactly 1.00 (the classic f64 failure)
        let dime = Money::from_cents(10);
        let total: Money = std::iter::repeat_n(dime, 10).sum();
        assert_eq!(total, Money::from_cents(100));
        assert_eq!(total.to_string(), "1.00");
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::from_cents(590).to_string(), "5.90");
        assert_eq!(Money::from_cents(5000).to_string(), "50.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_mul_quantity() {
        assert_eq!(Money::from_cents(850) * 2, Money::from_cents(1700));
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = Money::from_cents(850);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_serialize_as_decimal_amount() {
        // The wire format is the decimal amount, never a cent count or a
        // raw Decimal encoding.
        let json = serde_json::to_string(&Money::from_cents(850)).unwrap();
        assert_eq!(json, "\"8.50\"");
    }

    #[test]
    fn test_deserialize_plain_number() {
        let m: Money = serde_json::from_str("8.5").unwrap();
        assert_eq!(m, Money::from_cents(850));
    }
}
