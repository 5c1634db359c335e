//! Subscription plan and subscription repository.

use sqlx::PgPool;

use ferme_verte_core::{PlanId, SubscriptionId, UserId};

use super::{RepositoryError, new_id};
use crate::models::{Subscription, SubscriptionPlan, SubscriptionWithPlan};

const PLAN_COLUMNS: &str = "id, name, qty_kg, price_weekly, benefits, active";
const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_id, status, start_date, created_at";

/// Repository for subscription database operations.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List plans currently open for signup, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_plans(&self) -> Result<Vec<SubscriptionPlan>, RepositoryError> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS}
             FROM subscription_plans
             WHERE active = TRUE
             ORDER BY price_weekly ASC"
        );
        let plans = sqlx::query_as::<_, SubscriptionPlan>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(plans)
    }

    /// Fetch a plan by id, whether or not it is active.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_plan(
        &self,
        plan_id: &PlanId,
    ) -> Result<Option<SubscriptionPlan>, RepositoryError> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM subscription_plans WHERE id = $1");
        let plan = sqlx::query_as::<_, SubscriptionPlan>(&sql)
            .bind(plan_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(plan)
    }

    /// Find the user's active subscription, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_active_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS}
             FROM subscriptions
             WHERE user_id = $1 AND status = 'ACTIVE'"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(subscription)
    }

    /// Create an active subscription starting now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: &UserId,
        plan_id: &PlanId,
    ) -> Result<Subscription, RepositoryError> {
        let sql = format!(
            "INSERT INTO subscriptions (id, user_id, plan_id)
             VALUES ($1, $2, $3)
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&sql)
            .bind(SubscriptionId::from(new_id()))
            .bind(user_id)
            .bind(plan_id)
            .fetch_one(self.pool)
            .await?;
        Ok(subscription)
    }

    /// List a user's subscriptions with their plans, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SubscriptionWithPlan>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubscriptionPlanRow>(
            r"
            SELECT s.id, s.user_id, s.plan_id, s.status, s.start_date, s.created_at,
                   p.id AS plan_row_id, p.name, p.qty_kg, p.price_weekly,
                   p.benefits, p.active
            FROM subscriptions s
            JOIN subscription_plans p ON p.id = s.plan_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(SubscriptionPlanRow::into_api).collect())
    }
}

/// Flat join row; split back into subscription + plan for the API shape.
#[derive(sqlx::FromRow)]
struct SubscriptionPlanRow {
    #[sqlx(flatten)]
    subscription: Subscription,
    plan_row_id: PlanId,
    name: String,
    qty_kg: rust_decimal::Decimal,
    price_weekly: ferme_verte_core::Money,
    benefits: Vec<String>,
    active: bool,
}

impl SubscriptionPlanRow {
    fn into_api(self) -> SubscriptionWithPlan {
        SubscriptionWithPlan {
            subscription: self.subscription,
            plan: SubscriptionPlan {
                id: self.plan_row_id,
                name: self.name,
                qty_kg: self.qty_kg,
                price_weekly: self.price_weekly,
                benefits: self.benefits,
                active: self.active,
            },
        }
    }
}
