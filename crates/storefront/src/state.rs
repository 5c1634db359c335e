//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::ProductWithStock;

/// Cache key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogCacheKey {
    /// Products visible in the shop.
    ActiveProducts,
    /// Everything, including deactivated products.
    AllProducts,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog_cache: Cache<CatalogCacheKey, Arc<Vec<ProductWithStock>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(Duration::from_secs(config.catalog_cache_ttl_seconds))
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the catalog listing cache.
    ///
    /// Stock figures may lag the database by up to the configured TTL.
    #[must_use]
    pub fn catalog_cache(&self) -> &Cache<CatalogCacheKey, Arc<Vec<ProductWithStock>>> {
        &self.inner.catalog_cache
    }
}
