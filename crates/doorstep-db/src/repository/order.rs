//! # Order Repository
//!
//! SQLite persistence for order snapshots, implementing the
//! `OrderRepository` contract from doorstep-session.
//!
//! ## Storage Shape
//! One row per order. The frozen line items are stored as a JSON array in
//! the `items` column: orders are immutable documents read and written
//! whole, so relational line-item rows would buy nothing but join cost.
//! Customer fields are flattened into columns for back-office filtering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use doorstep_core::{CustomerInfo, LineItem, OrderSnapshot, OrderStatus};
use doorstep_session::{OrderRepository, PersistenceError, StoreResult};

use crate::error::{DbError, DbResult};

/// Raw order row as stored.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    order_number: String,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    customer_notes: Option<String>,
    items: String,
    subtotal_cents: i64,
    shipping_fee_cents: i64,
    total_cents: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    /// Decodes the row into the domain snapshot. JSON or status values this
    /// build doesn't understand surface as [`DbError::CorruptRecord`] rather
    /// than a panic.
    fn into_snapshot(self) -> DbResult<OrderSnapshot> {
        let items: Vec<LineItem> = serde_json::from_str(&self.items).map_err(|e| {
            DbError::CorruptRecord(format!("order {}: malformed items payload: {e}", self.id))
        })?;

        let status: OrderStatus = self.status.parse().map_err(|e| {
            DbError::CorruptRecord(format!("order {}: {e}", self.id))
        })?;

        Ok(OrderSnapshot {
            id: self.id,
            order_number: self.order_number,
            customer: CustomerInfo {
                name: self.customer_name,
                phone: self.customer_phone,
                address: self.customer_address,
                notes: self.customer_notes,
            },
            items,
            subtotal_cents: self.subtotal_cents,
            shipping_fee_cents: self.shipping_fee_cents,
            total_cents: self.total_cents,
            status,
            created_at: self.created_at,
        })
    }
}

const SELECT_ORDER: &str = r#"
    SELECT id, order_number, customer_name, customer_phone, customer_address,
           customer_notes, items, subtotal_cents, shipping_fee_cents,
           total_cents, status, created_at
    FROM orders
"#;

/// SQLite-backed order repository.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    /// Creates a new SqliteOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteOrderRepository { pool }
    }

    async fn insert(&self, order: &OrderSnapshot) -> DbResult<()> {
        let items = serde_json::to_string(&order.items)
            .map_err(|e| DbError::Internal(format!("items serialization failed: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, customer_name, customer_phone,
                customer_address, customer_notes, items,
                subtotal_cents, shipping_fee_cents, total_cents,
                status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(&order.customer.name)
        .bind(&order.customer.phone)
        .bind(&order.customer.address)
        .bind(&order.customer.notes)
        .bind(items)
        .bind(order.subtotal_cents)
        .bind(order.shipping_fee_cents)
        .bind(order.total_cents)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        debug!(order_number = %order.order_number, "Inserted order");
        Ok(())
    }

    async fn set_status(&self, order_id: &str, status: OrderStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        debug!(order_id = %order_id, status = %status, "Updated order status");
        Ok(())
    }

    async fn list(&self) -> DbResult<Vec<OrderSnapshot>> {
        let rows: Vec<OrderRow> =
            sqlx::query_as(&format!("{SELECT_ORDER} ORDER BY created_at DESC"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(OrderRow::into_snapshot).collect()
    }

    async fn get(&self, order_id: &str) -> DbResult<Option<OrderSnapshot>> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(OrderRow::into_snapshot).transpose()
    }

    async fn delete(&self, order_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        debug!(order_id = %order_id, "Deleted order");
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn save_order(&self, order: &OrderSnapshot) -> StoreResult<()> {
        self.insert(order).await.map_err(PersistenceError::from)
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        self.set_status(order_id, status)
            .await
            .map_err(PersistenceError::from)
    }

    async fn list_orders(&self) -> StoreResult<Vec<OrderSnapshot>> {
        self.list().await.map_err(PersistenceError::from)
    }

    async fn get_order(&self, order_id: &str) -> StoreResult<Option<OrderSnapshot>> {
        self.get(order_id).await.map_err(PersistenceError::from)
    }

    async fn delete_order(&self, order_id: &str) -> StoreResult<()> {
        self.delete(order_id).await.map_err(PersistenceError::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
