//! Subscription plan and subscription models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use ferme_verte_core::{Money, PlanId, SubscriptionId, SubscriptionStatus, UserId};

/// A weekly asparagus basket plan.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    /// Kilograms delivered per week.
    pub qty_kg: Decimal,
    pub price_weekly: Money,
    /// Marketing bullet points shown on the plan card.
    pub benefits: Vec<String>,
    pub active: bool,
}

/// A user's subscription to a plan.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A subscription joined with its plan, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionWithPlan {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub plan: SubscriptionPlan,
}
