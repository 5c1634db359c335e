//! Order API routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use ferme_verte_core::OrderId;

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::OrderWithItems;
use crate::services::checkout::{CheckoutPayload, build_order};
use crate::state::AppState;

/// Place an order.
///
/// POST /api/orders
///
/// Works for guests; when a user is logged in the order is attached to
/// their account. The server recomputes the total from the submitted
/// lines and rejects a payload whose claimed total disagrees.
///
/// # Errors
///
/// Returns 400 for an empty or inconsistent payload.
pub async fn create(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(payload): Json<CheckoutPayload>,
) -> Result<(StatusCode, Json<OrderWithItems>)> {
    let user_id = user.map(|u| u.id);
    let new_order =
        build_order(payload, user_id).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let order = OrderRepository::new(state.pool()).create(new_order).await?;

    tracing::info!(
        order_id = %order.order.id,
        total = %order.order.total,
        items = order.items.len(),
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// The current user's orders, newest first.
///
/// GET /api/orders
///
/// # Errors
///
/// Returns 401 when not logged in.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(&user.id)
        .await?;
    Ok(Json(orders))
}

/// One of the current user's orders.
///
/// GET /api/orders/{id}
///
/// # Errors
///
/// Returns 404 when the order does not exist or belongs to someone else.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithItems>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(&user.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
    Ok(Json(order))
}
