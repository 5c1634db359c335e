//! Seasonal pre-order request model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use ferme_verte_core::PreorderId;

/// A pre-order request for the coming harvest.
///
/// No account required; the farm calls back to arrange the details.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PreorderRequest {
    pub id: PreorderId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Requested quantity in kilograms, at least 1.
    pub qty_kg: Decimal,
    pub preferred_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
