//! Catalog API routes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::ProductWithStock;
use crate::state::{AppState, CatalogCacheKey};

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Set to `false` to include deactivated products.
    pub active: Option<bool>,
}

/// List products with computed stock, cheapest first.
///
/// GET /api/products
///
/// Listings are cached; stock figures may lag by up to the cache TTL.
///
/// # Errors
///
/// Returns `AppError::Database` if the catalog query fails.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Arc<Vec<ProductWithStock>>>> {
    let active_only = query.active.unwrap_or(true);
    let key = if active_only {
        CatalogCacheKey::ActiveProducts
    } else {
        CatalogCacheKey::AllProducts
    };

    let products = state
        .catalog_cache()
        .try_get_with(key, async {
            ProductRepository::new(state.pool())
                .list(active_only)
                .await
                .map(Arc::new)
        })
        .await
        .map_err(|e: Arc<crate::db::RepositoryError>| {
            AppError::Internal(format!("catalog load failed: {e}"))
        })?;

    Ok(Json(products))
}

/// Product detail by slug.
///
/// GET /api/products/{slug}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has the slug.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductWithStock>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    Ok(Json(product))
}
