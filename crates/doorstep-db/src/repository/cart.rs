//! # Cart Repository
//!
//! SQLite persistence for per-user cart lines, implementing the
//! `CartRepository` contract from doorstep-session.
//!
//! ## Storage Shape
//! One row per (user, product). Display fields and quantity are nullable on
//! purpose: older writers may have omitted them, and the core normalizes
//! records on load. `position` preserves insertion order across the
//! delete-and-reinsert writes.
//!
//! ## Write Strategy
//! `save_cart` replaces the whole cart in one transaction (delete then
//! insert). Carts are small (a handful of lines), so whole-document replace
//! is simpler and safer than diffing, and it matches the contract's
//! "replaces whatever was stored" semantics exactly.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use doorstep_core::{CartRecord, LineItem};
use doorstep_session::{CartRepository, PersistenceError, StoreResult};

use crate::error::DbResult;

/// Raw cart row as stored. Nullable fields mirror the schema.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    product_id: String,
    name: Option<String>,
    unit_price_cents: Option<i64>,
    image: Option<String>,
    quantity: Option<i64>,
}

impl From<CartItemRow> for CartRecord {
    fn from(row: CartItemRow) -> Self {
        CartRecord {
            product_id: row.product_id,
            name: row.name,
            unit_price_cents: row.unit_price_cents,
            image: row.image,
            quantity: row.quantity,
        }
    }
}

/// SQLite-backed cart repository.
#[derive(Debug, Clone)]
pub struct SqliteCartRepository {
    pool: SqlitePool,
}

impl SqliteCartRepository {
    /// Creates a new SqliteCartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCartRepository { pool }
    }

    async fn load(&self, user_id: &str) -> DbResult<Vec<CartRecord>> {
        let rows: Vec<CartItemRow> = sqlx::query_as(
            r#"
            SELECT product_id, name, unit_price_cents, image, quantity
            FROM cart_items
            WHERE user_id = ?1
            ORDER BY position
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = %user_id, count = rows.len(), "Loaded cart rows");
        Ok(rows.into_iter().map(CartRecord::from).collect())
    }

    async fn save(&self, user_id: &str, items: &[LineItem]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cart_items WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cart_items (
                    user_id, product_id, name, unit_price_cents,
                    image, quantity, position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(user_id)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.unit_price_cents)
            .bind(&item.image)
            .bind(item.quantity)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(user_id = %user_id, lines = items.len(), "Saved cart");
        Ok(())
    }

    async fn delete_item(&self, user_id: &str, product_id: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = ?1 AND product_id = ?2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user_id, product_id = %product_id, "Deleted cart line");
        Ok(())
    }

    async fn delete_all(&self, user_id: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user_id, "Deleted cart");
        Ok(())
    }
}

#[async_trait]
impl CartRepository for SqliteCartRepository {
    async fn load_cart(&self, user_id: &str) -> StoreResult<Vec<CartRecord>> {
        self.load(user_id).await.map_err(PersistenceError::from)
    }

    async fn save_cart(&self, user_id: &str, items: &[LineItem]) -> StoreResult<()> {
        self.save(user_id, items)
            .await
            .map_err(PersistenceError::from)
    }

    async fn delete_cart_item(&self, user_id: &str, product_id: &str) -> StoreResult<()> {
        self.delete_item(user_id, product_id)
            .await
            .map_err(PersistenceError::from)
    }

    async fn delete_cart(&self, user_id: &str) -> StoreResult<()> {
        self.delete_all(user_id)
            .await
            .map_err(PersistenceError::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn line(id: &str, price_cents: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            unit_price_cents: price_cents,
            image: String::new(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_save_and_load_preserves_order() {
        let db = test_db().await;
        let repo = db.carts();

        repo.save_cart("u1", &[line("B", 550, 1), line("A", 1000, 2)])
            .await
            .unwrap();

        let records = repo.load_cart("u1").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_id, "B");
        assert_eq!(records[1].product_id, "A");
        assert_eq!(records[1].quantity, Some(2));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_cart() {
        let db = test_db().await;
        let repo = db.carts();

        repo.save_cart("u1", &[line("A", 1000, 1), line("B", 550, 1)])
            .await
            .unwrap();
        repo.save_cart("u1", &[line("C", 200, 3)]).await.unwrap();

        let records = repo.load_cart("u1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_id, "C");
    }

    #[tokio::test]
    async fn test_missing_user_loads_empty() {
        let db = test_db().await;
        assert!(db.carts().load_cart("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_item_and_cart() {
        let db = test_db().await;
        let repo = db.carts();

        repo.save_cart("u1", &[line("A", 1000, 1), line("B", 550, 1)])
            .await
            .unwrap();

        repo.delete_cart_item("u1", "A").await.unwrap();
        assert_eq!(repo.load_cart("u1").await.unwrap().len(), 1);

        // Absent line is a no-op
        repo.delete_cart_item("u1", "ghost").await.unwrap();

        repo.delete_cart("u1").await.unwrap();
        assert!(repo.load_cart("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_tolerant_rows_surface_as_partial_records() {
        let db = test_db().await;

        // Simulate a row written by an older client
        sqlx::query(
            "INSERT INTO cart_items (user_id, product_id, position) VALUES ('u1', 'old', 0)",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let records = db.carts().load_cart("u1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, None);
        assert_eq!(records[0].quantity, None);

        // The core fills in defaults
        let cart = doorstep_core::Cart::from_records(records);
        assert_eq!(cart.items()[0].name, "Product");
        assert_eq!(cart.items()[0].quantity, 1);
    }
}
