//! # Product Repository
//!
//! Catalog operations for the admin back office and the storefront listing.
//!
//! Unlike the cart/order/settings repositories there is no abstract contract
//! behind this one: the catalog is only ever SQLite-backed, so the session
//! layer never sees it.
//!
//! ## Search
//! Case-insensitive substring match over name, description, and category
//! using `LIKE`. The catalog is small (hundreds of products, not tens of
//! thousands), so a scan is fine and FTS machinery would be overkill.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use doorstep_core::Product;

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: String,
    name: String,
    description: String,
    price_cents: i64,
    image: String,
    video: Option<String>,
    category: String,
    in_stock: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            image: row.image,
            video: row.video,
            category: row.category,
            in_stock: row.in_stock,
            created_at: row.created_at,
        }
    }
}

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, description, price_cents, image, video,
           category, in_stock, created_at
    FROM products
"#;

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let results = repo.search("cord", 20).await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// The id should be generated beforehand ([`generate_product_id`]).
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, image, video,
                category, in_stock, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image)
        .bind(&product.video)
        .bind(&product.category)
        .bind(product.in_stock)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                image = ?5,
                video = ?6,
                category = ?7,
                in_stock = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image)
        .bind(&product.video)
        .bind(&product.category)
        .bind(product.in_stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// A hard delete: placed orders carry frozen copies of their line items,
    /// so nothing dangles when the catalog entry goes away.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Lists products, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "{SELECT_PRODUCT} ORDER BY created_at DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Searches products by substring over name, description, and category.
    ///
    /// Case-insensitive (SQLite `LIKE` semantics). An empty query falls back
    /// to the plain newest-first listing.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list(limit).await;
        }

        // LIKE wildcards in user input would silently widen the match
        let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            r#"
            {SELECT_PRODUCT}
            WHERE name LIKE ?1 ESCAPE '\'
               OR description LIKE ?1 ESCAPE '\'
               OR category LIKE ?1 ESCAPE '\'
            ORDER BY created_at DESC
            LIMIT ?2
            "#
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn product(name: &str, category: &str, price_cents: i64) -> Product {
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            description: format!("{name} description"),
            price_cents,
            image: String::new(),
            video: None,
            category: category.to_string(),
            in_stock: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo
            .insert(&product("Extension Cord", "Electrical", 1000))
            .await
            .unwrap();

        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Extension Cord");
        assert_eq!(fetched.price_cents, 1000);
        assert!(fetched.in_stock);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let repo = db.products();

        let mut item = repo
            .insert(&product("LED Bulb", "Lighting", 250))
            .await
            .unwrap();

        item.price_cents = 199;
        item.in_stock = false;
        repo.update(&item).await.unwrap();

        let fetched = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 199);
        assert!(!fetched.in_stock);

        let ghost = product("Ghost", "General", 1);
        assert!(matches!(
            repo.update(&ghost).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.products();

        let item = repo.insert(&product("Tape", "General", 150)).await.unwrap();
        repo.delete(&item.id).await.unwrap();

        assert!(repo.get_by_id(&item.id).await.unwrap().is_none());
        assert!(repo.delete(&item.id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        let repo = db.products();

        let mut older = product("Older", "General", 100);
        older.created_at = Utc::now() - Duration::minutes(5);
        repo.insert(&older).await.unwrap();
        repo.insert(&product("Newer", "General", 100)).await.unwrap();

        let listed = repo.list(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Newer");
        assert_eq!(listed[1].name, "Older");
    }

    #[tokio::test]
    async fn test_search_matches_name_description_and_category() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&product("Extension Cord", "Electrical", 1000))
            .await
            .unwrap();
        repo.insert(&product("LED Bulb", "Lighting", 250))
            .await
            .unwrap();

        // Name, case-insensitive
        let by_name = repo.search("cord", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Extension Cord");

        // Category
        let by_category = repo.search("light", 10).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "LED Bulb");

        // Empty query lists everything
        assert_eq!(repo.search("  ", 10).await.unwrap().len(), 2);

        // No match
        assert!(repo.search("plumbing", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_escapes_like_wildcards() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&product("100% Cotton Rope", "General", 700))
            .await
            .unwrap();
        repo.insert(&product("Nylon Rope", "General", 500))
            .await
            .unwrap();

        let results = repo.search("100%", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "100% Cotton Rope");
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.products();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(&product("Tape", "General", 150)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
