//! # Favorites Repository
//!
//! SQLite persistence for per-user favorites, implementing the
//! `FavoritesRepository` contract from doorstep-session.
//!
//! ## Storage Shape
//! One row per (user, product); the PRIMARY KEY carries the "favorited at
//! most once" rule, so a duplicate add surfaces as a unique violation with
//! no separate existence check. Only the product id is stored; see
//! [`SqliteFavoritesRepository::list_favorite_products`] for the catalog
//! join the storefront's favorites page wants.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use doorstep_core::Product;
use doorstep_session::{FavoritesRepository, PersistenceError, StoreResult};

use crate::error::{DbError, DbResult};

/// SQLite-backed favorites repository.
#[derive(Debug, Clone)]
pub struct SqliteFavoritesRepository {
    pool: SqlitePool,
}

impl SqliteFavoritesRepository {
    /// Creates a new SqliteFavoritesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteFavoritesRepository { pool }
    }

    async fn add(&self, user_id: &str, product_id: &str) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO favorites (user_id, product_id, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(user_id = %user_id, product_id = %product_id, "Added favorite");
        Ok(())
    }

    async fn remove(&self, user_id: &str, product_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ?1 AND product_id = ?2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Favorite", product_id));
        }

        debug!(user_id = %user_id, product_id = %product_id, "Removed favorite");
        Ok(())
    }

    async fn list(&self, user_id: &str) -> DbResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT product_id FROM favorites WHERE user_id = ?1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn check(&self, user_id: &str, product_id: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM favorites WHERE user_id = ?1 AND product_id = ?2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Favorited products joined against the catalog, oldest favorite first.
    ///
    /// Products deleted from the catalog since they were favorited drop out
    /// of the listing rather than erroring.
    pub async fn list_favorite_products(&self, user_id: &str) -> DbResult<Vec<Product>> {
        use crate::repository::product::ProductRow;

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.name, p.description, p.price_cents, p.image, p.video,
                   p.category, p.in_stock, p.created_at
            FROM products p
            INNER JOIN favorites f ON f.product_id = p.id
            WHERE f.user_id = ?1
            ORDER BY f.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl FavoritesRepository for SqliteFavoritesRepository {
    async fn add_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<()> {
        self.add(user_id, product_id)
            .await
            .map_err(PersistenceError::from)
    }

    async fn remove_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<()> {
        self.remove(user_id, product_id)
            .await
            .map_err(PersistenceError::from)
    }

    async fn list_favorites(&self, user_id: &str) -> StoreResult<Vec<String>> {
        self.list(user_id).await.map_err(PersistenceError::from)
    }

    async fn is_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<bool> {
        self.check(user_id, product_id)
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
    use crate::repository::product::generate_product_id;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn product(name: &str) -> Product {
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            description: String::new(),
            price_cents: 100,
            image: String::new(),
            video: None,
            category: "General".to_string(),
            in_stock: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_list_check_remove() {
        let db = test_db().await;
        let repo = db.favorites();

        repo.add_favorite("u1", "A").await.unwrap();
        repo.add_favorite("u1", "B").await.unwrap();

        assert_eq!(repo.list_favorites("u1").await.unwrap(), vec!["A", "B"]);
        assert!(repo.is_favorite("u1", "A").await.unwrap());
        assert!(!repo.is_favorite("u1", "C").await.unwrap());
        assert!(!repo.is_favorite("u2", "A").await.unwrap());

        repo.remove_favorite("u1", "A").await.unwrap();
        assert!(!repo.is_favorite("u1", "A").await.unwrap());
        assert_eq!(repo.list_favorites("u1").await.unwrap(), vec!["B"]);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected() {
        let db = test_db().await;
        let repo = db.favorites();

        repo.add_favorite("u1", "A").await.unwrap();
        assert!(repo.add_favorite("u1", "A").await.is_err());

        // The same product for another user is fine
        repo.add_favorite("u2", "A").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_absent_is_an_error() {
        let db = test_db().await;
        assert!(db.favorites().remove_favorite("u1", "ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_list_favorite_products_joins_catalog() {
        let db = test_db().await;
        let favorites = db.favorites();
        let products = db.products();

        let cord = products.insert(&product("Extension Cord")).await.unwrap();
        let bulb = products.insert(&product("LED Bulb")).await.unwrap();

        favorites.add_favorite("u1", &cord.id).await.unwrap();
        favorites.add_favorite("u1", &bulb.id).await.unwrap();
        // A favorite whose product was since deleted
        favorites.add_favorite("u1", "gone").await.unwrap();

        let listed = favorites.list_favorite_products("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Extension Cord");
        assert_eq!(listed[1].name, "LED Bulb");
    }
}
