//! # Storage Collaborator Contracts
//!
//! The async traits this crate's flows are written against. Implementations
//! must be thread-safe (`Send + Sync`); the SQLite versions live in
//! doorstep-db and an in-memory version lives in [`crate::memory`].
//!
//! ## Failure Contract
//! Every operation is a single request/response unit: it either completes or
//! fails with [`PersistenceError`]. No retries happen below this boundary,
//! and a failed write must leave the stored state as it was.

use async_trait::async_trait;

use doorstep_core::{CartRecord, LineItem, OrderSnapshot, OrderStatus, ShippingSettings};

use crate::error::PersistenceError;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, PersistenceError>;

// =============================================================================
// Cart Repository
// =============================================================================

/// Persistence for per-user carts.
///
/// A cart is keyed by the caller-supplied user id; the identity collaborator
/// guarantees the same id is presented consistently for one user. Carts are
/// saved whole-document style: `save_cart` replaces whatever was stored.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Loads the raw cart records for a user. A user with no cart yet gets
    /// an empty list, not an error. Records may be partially populated;
    /// normalization is the caller's job (`Cart::from_records`).
    async fn load_cart(&self, user_id: &str) -> StoreResult<Vec<CartRecord>>;

    /// Replaces the stored cart with the given lines, preserving their
    /// order.
    async fn save_cart(&self, user_id: &str, items: &[LineItem]) -> StoreResult<()>;

    /// Deletes one line from the stored cart. Absent lines are a no-op.
    async fn delete_cart_item(&self, user_id: &str, product_id: &str) -> StoreResult<()>;

    /// Empties the stored cart. A user with no cart is a no-op.
    async fn delete_cart(&self, user_id: &str) -> StoreResult<()>;
}

// =============================================================================
// Order Repository
// =============================================================================

/// Persistence for placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a freshly assembled snapshot. Order ids and numbers are
    /// unique; saving a duplicate is an error.
    async fn save_order(&self, order: &OrderSnapshot) -> StoreResult<()>;

    /// Overwrites the status of an order. Unknown order ids are an error.
    ///
    /// Deliberately permissive: any status value may be written at any time
    /// (admin override), no transition ordering is enforced here.
    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()>;

    /// All orders, newest first (the admin back-office listing).
    async fn list_orders(&self) -> StoreResult<Vec<OrderSnapshot>>;

    /// One order by id.
    async fn get_order(&self, order_id: &str) -> StoreResult<Option<OrderSnapshot>>;

    /// Removes an order entirely. Unknown order ids are an error.
    async fn delete_order(&self, order_id: &str) -> StoreResult<()>;
}

// =============================================================================
// Favorites Repository
// =============================================================================

/// Persistence for per-user favorite products.
///
/// Favorites are a flat (user, product) relation; the stored value is just
/// the product id, joined against the catalog when products are wanted.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Marks a product as a favorite. Favoriting a product twice is an
    /// error, mirroring the uniqueness of the (user, product) pair.
    async fn add_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<()>;

    /// Unmarks a favorite. Removing a product that was never favorited is
    /// an error.
    async fn remove_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<()>;

    /// Product ids the user has favorited, oldest first.
    async fn list_favorites(&self, user_id: &str) -> StoreResult<Vec<String>>;

    /// Whether the user has favorited this product.
    async fn is_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<bool>;
}

// =============================================================================
// Settings Repository
// =============================================================================

/// Persistence for the process-wide shipping settings singleton.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Current settings, or the documented defaults
    /// (`{fee: 0, threshold: 0, enabled: true}`) when none exist yet.
    async fn load_shipping_settings(&self) -> StoreResult<ShippingSettings>;

    /// Replaces the stored settings. Last write wins; readers simply observe
    /// whatever value is currently committed.
    async fn save_shipping_settings(&self, settings: &ShippingSettings) -> StoreResult<()>;
}
