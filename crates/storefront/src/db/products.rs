//! Product repository.
//!
//! Stock is derived, never stored on the product row: each product owns
//! inventory lots (one per harvest) and the shop shows the sum of the
//! lots' available quantities.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::ProductWithStock;

const PRODUCT_WITH_STOCK: &str = r"
    SELECT p.id, p.name, p.slug, p.description, p.price, p.unit,
           p.images, p.tags, p.active, p.created_at,
           COALESCE(SUM(l.quantity_available)
                    FILTER (WHERE l.quantity_available > 0), 0)::BIGINT
               AS total_stock
    FROM products p
    LEFT JOIN inventory_lots l ON l.product_id = p.id
";

/// Repository for catalog queries.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products with their total stock, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<ProductWithStock>, RepositoryError> {
        let sql = format!(
            "{PRODUCT_WITH_STOCK}
             WHERE ($1 = FALSE OR p.active = TRUE)
             GROUP BY p.id
             ORDER BY p.price ASC"
        );

        let products = sqlx::query_as::<_, ProductWithStock>(&sql)
            .bind(active_only)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Get one product by slug with its total stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductWithStock>, RepositoryError> {
        let sql = format!(
            "{PRODUCT_WITH_STOCK}
             WHERE p.slug = $1
             GROUP BY p.id"
        );

        let product = sqlx::query_as::<_, ProductWithStock>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }
}
