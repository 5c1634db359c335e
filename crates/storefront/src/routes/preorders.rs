//! Seasonal preorder API route.

use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::preorders::{NewPreorder, PreorderRepository};
use crate::error::{AppError, Result};
use crate::models::PreorderRequest;
use crate::state::AppState;

/// Request body for a seasonal preorder.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreorderRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub qty_kg: Decimal,
    pub preferred_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Record a preorder request for the coming season. No account needed.
///
/// POST /api/preorders
///
/// # Errors
///
/// Returns 400 when name or phone is blank or the quantity is under 1 kg.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePreorderRequest>,
) -> Result<(StatusCode, Json<PreorderRequest>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if body.phone.trim().is_empty() {
        return Err(AppError::BadRequest("phone is required".to_string()));
    }
    if body.qty_kg < Decimal::ONE {
        return Err(AppError::BadRequest(
            "quantity must be at least 1 kg".to_string(),
        ));
    }

    let preorder = PreorderRepository::new(state.pool())
        .create(NewPreorder {
            name: body.name,
            phone: body.phone,
            email: body.email,
            qty_kg: body.qty_kg,
            preferred_date: body.preferred_date,
            notes: body.notes,
        })
        .await?;

    tracing::info!(preorder_id = %preorder.id, qty_kg = %preorder.qty_kg, "Preorder recorded");

    Ok((StatusCode::CREATED, Json(preorder)))
}
