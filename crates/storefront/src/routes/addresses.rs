//! Saved address API routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use ferme_verte_core::AddressId;

use crate::db::RepositoryError;
use crate::db::addresses::{AddressRepository, NewAddress};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Address;
use crate::state::AppState;

/// Request body for saving an address.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub zip: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub phone: String,
    #[serde(default)]
    pub is_default: bool,
}

fn default_country() -> String {
    "France".to_string()
}

/// The current user's saved addresses, default first.
///
/// GET /api/addresses
///
/// # Errors
///
/// Returns 401 when not logged in.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_user(&user.id)
        .await?;
    Ok(Json(addresses))
}

/// Save a new address; making it the default unsets the previous one.
///
/// POST /api/addresses
///
/// # Errors
///
/// Returns 400 when required fields are blank.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<Address>)> {
    if body.line1.trim().is_empty() || body.city.trim().is_empty() || body.zip.trim().is_empty() {
        return Err(AppError::BadRequest(
            "line1, city and zip are required".to_string(),
        ));
    }

    let address = AddressRepository::new(state.pool())
        .create(
            &user.id,
            NewAddress {
                line1: body.line1,
                line2: body.line2,
                city: body.city,
                zip: body.zip,
                country: body.country,
                phone: body.phone,
                is_default: body.is_default,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// Delete one of the current user's addresses.
///
/// DELETE /api/addresses/{id}
///
/// # Errors
///
/// Returns 404 when the address does not exist or belongs to someone else.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    AddressRepository::new(state.pool())
        .delete(&user.id, &id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Address".to_string()),
            other => AppError::Database(other),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
