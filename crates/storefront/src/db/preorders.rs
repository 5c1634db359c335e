//! Preorder request repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use ferme_verte_core::PreorderId;

use super::{RepositoryError, new_id};
use crate::models::PreorderRequest;

/// Fields for recording a season preorder request.
#[derive(Debug, Clone)]
pub struct NewPreorder {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub qty_kg: Decimal,
    pub preferred_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Repository for preorder request database operations.
pub struct PreorderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PreorderRepository<'a> {
    /// Create a new preorder repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a preorder request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, preorder: NewPreorder) -> Result<PreorderRequest, RepositoryError> {
        let created = sqlx::query_as::<_, PreorderRequest>(
            r"
            INSERT INTO preorder_requests
                (id, name, phone, email, qty_kg, preferred_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, phone, email, qty_kg, preferred_date, notes, created_at
            ",
        )
        .bind(PreorderId::from(new_id()))
        .bind(&preorder.name)
        .bind(&preorder.phone)
        .bind(&preorder.email)
        .bind(preorder.qty_kg)
        .bind(preorder.preferred_date)
        .bind(&preorder.notes)
        .fetch_one(self.pool)
        .await?;
        Ok(created)
    }
}
