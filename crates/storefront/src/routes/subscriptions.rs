//! Subscription plan and subscription API routes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

use ferme_verte_core::PlanId;

use crate::db::subscriptions::SubscriptionRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Subscription, SubscriptionPlan, SubscriptionWithPlan};
use crate::state::AppState;

/// Request body for subscribing to a plan.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub plan_id: PlanId,
}

/// Active subscription plans, cheapest first.
///
/// GET /api/plans
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn plans(State(state): State<AppState>) -> Result<Json<Vec<SubscriptionPlan>>> {
    let plans = SubscriptionRepository::new(state.pool())
        .list_active_plans()
        .await?;
    Ok(Json(plans))
}

/// The current user's subscriptions with their plans, newest first.
///
/// GET /api/subscriptions
///
/// # Errors
///
/// Returns 401 when not logged in.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<SubscriptionWithPlan>>> {
    let subscriptions = SubscriptionRepository::new(state.pool())
        .list_for_user(&user.id)
        .await?;
    Ok(Json(subscriptions))
}

/// Subscribe the current user to a plan.
///
/// POST /api/subscriptions
///
/// One active subscription per user; the plan must exist and be open
/// for signup.
///
/// # Errors
///
/// Returns 400 if an active subscription exists, 404 for an unknown or
/// inactive plan.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Subscription>)> {
    let repo = SubscriptionRepository::new(state.pool());

    if repo.find_active_for_user(&user.id).await?.is_some() {
        return Err(AppError::BadRequest(
            "You already have an active subscription".to_string(),
        ));
    }

    let plan = repo
        .get_plan(&body.plan_id)
        .await?
        .filter(|p| p.active)
        .ok_or_else(|| AppError::NotFound("Plan".to_string()))?;

    let subscription = repo.create(&user.id, &plan.id).await?;

    tracing::info!(
        user_id = %user.id,
        plan = %plan.name,
        "Subscription created"
    );

    Ok((StatusCode::CREATED, Json(subscription)))
}
