//! Address repository.

use sqlx::PgPool;

use ferme_verte_core::{AddressId, UserId};

use super::{RepositoryError, new_id};
use crate::models::Address;

/// Fields for creating an address; validated by the caller.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}

/// Repository for saved delivery addresses.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's addresses, default first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(
            r"
            SELECT id, user_id, line1, line2, city, zip, country, phone,
                   is_default, created_at
            FROM addresses
            WHERE user_id = $1
            ORDER BY is_default DESC, created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Create an address for a user.
    ///
    /// When `is_default` is set, the user's previous default is unset in
    /// the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn create(
        &self,
        user_id: &UserId,
        address: NewAddress,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if address.is_default {
            sqlx::query(
                r"
                UPDATE addresses
                SET is_default = FALSE
                WHERE user_id = $1 AND is_default = TRUE
                ",
            )
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        let created = sqlx::query_as::<_, Address>(
            r"
            INSERT INTO addresses
                (id, user_id, line1, line2, city, zip, country, phone, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, line1, line2, city, zip, country, phone,
                      is_default, created_at
            ",
        )
        .bind(new_id())
        .bind(user_id)
        .bind(&address.line1)
        .bind(&address.line2)
        .bind(&address.city)
        .bind(&address.zip)
        .bind(&address.country)
        .bind(&address.phone)
        .bind(address.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Delete a user's address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist
    /// or belongs to another user.
    pub async fn delete(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM addresses
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(address_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
