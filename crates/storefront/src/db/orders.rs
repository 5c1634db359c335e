//! Order repository.
//!
//! Orders and their items are written in one transaction; items carry
//! name and price snapshots so later catalog edits never rewrite history.

use sqlx::PgPool;
use sqlx::types::Json;

use ferme_verte_core::cart::DeliveryMethod;
use ferme_verte_core::{Money, OrderId, OrderStatus, ProductId, UserId};

use super::{RepositoryError, new_id};
use crate::models::{AddressSnapshot, Order, OrderItem, OrderWithItems};

/// A checkout item as accepted by [`OrderRepository::create`].
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

/// Fields for creating an order; validated and totaled by the caller.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub address_snapshot: AddressSnapshot,
    pub total: Money,
    pub delivery_method: DeliveryMethod,
    pub delivery_slot: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// Raw order row; `delivery_method` and the address document are decoded
/// into their domain types by [`OrderRow::into_order`].
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: Option<UserId>,
    address_snapshot: Json<AddressSnapshot>,
    total: Money,
    status: OrderStatus,
    delivery_method: String,
    delivery_slot: Option<String>,
    notes: Option<String>,
    payment_method: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let delivery_method: DeliveryMethod = self.delivery_method.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid delivery method in database: {e}"))
        })?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            address_snapshot: self.address_snapshot.0,
            total: self.total,
            status: self.status,
            delivery_method,
            delivery_slot: self.delivery_slot,
            notes: self.notes,
            payment_method: self.payment_method,
            created_at: self.created_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, user_id, address_snapshot, total, status, \
     delivery_method, delivery_slot, notes, payment_method, created_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails (the
    /// transaction rolls back and nothing is persisted).
    pub async fn create(&self, new_order: NewOrder) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO orders
                 (id, user_id, address_snapshot, total, delivery_method,
                  delivery_slot, notes, payment_method)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(new_id())
            .bind(&new_order.user_id)
            .bind(Json(&new_order.address_snapshot))
            .bind(new_order.total)
            .bind(new_order.delivery_method.as_str())
            .bind(&new_order.delivery_slot)
            .bind(&new_order.notes)
            .bind("cash_on_delivery")
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(new_order.items.len());
        for item in &new_order.items {
            let created = sqlx::query_as::<_, OrderItem>(
                r"
                INSERT INTO order_items
                    (id, order_id, product_id, name_snapshot, price_snapshot, quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, order_id, product_id, name_snapshot, price_snapshot, quantity
                ",
            )
            .bind(new_id())
            .bind(&row.id)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.price)
            .bind(i32::try_from(item.quantity).map_err(|_| {
                RepositoryError::DataCorruption(format!(
                    "order item quantity {} exceeds column range",
                    item.quantity
                ))
            })?)
            .fetch_one(&mut *tx)
            .await?;
            items.push(created);
        }

        tx.commit().await?;

        Ok(OrderWithItems {
            order: row.into_order()?,
            items,
        })
    }

    /// List a user's orders with items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for undecodable rows.
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        let order_ids: Vec<String> = rows.iter().map(|r| r.id.as_str().to_owned()).collect();
        let mut all_items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT id, order_id, product_id, name_snapshot, price_snapshot, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            let order = row.into_order()?;
            let items = all_items
                .extract_if(.., |item| item.order_id == id)
                .collect();
            orders.push(OrderWithItems { order, items });
        }
        // Items of deleted orders cannot remain; anything left means a
        // dangling foreign key.
        debug_assert!(all_items.is_empty());

        Ok(orders)
    }

    /// Get one of a user's orders with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders
             WHERE id = $1 AND user_id = $2"
        );
        let Some(row) = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT id, order_id, product_id, name_snapshot, price_snapshot, quantity
            FROM order_items
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OrderWithItems {
            order: row.into_order()?,
            items,
        }))
    }
}
