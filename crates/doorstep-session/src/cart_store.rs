//! # Cart Store
//!
//! One user's cart, loaded at session start and written through to the
//! [`CartRepository`] on every mutation.
//!
//! ## Atomicity
//! ```text
//! mutation request
//!      │
//!      ▼
//! compute next cart (clone + pure Cart op)
//!      │
//!      ▼
//! remote write ── fails ──► surface PersistenceError, keep old cart
//!      │
//!      ▼
//! commit next cart locally
//! ```
//! From the caller's view every mutation either fully applies (local state
//! updated and remote write acknowledged) or fully fails (local state
//! unchanged). There is never a window where local and remote disagree
//! because of a partial mutation.
//!
//! ## Ownership
//! Each user identity's cart is mutated only by that identity's session, so
//! no locking is needed here; cross-user concurrency shares nothing through
//! this type.

use tracing::{debug, warn};

use doorstep_core::cart::Cart;
use doorstep_core::error::CoreError;
use doorstep_core::pricing::{self, CartTotals};
use doorstep_core::types::{LineItem, Product, ShippingSettings};

use crate::error::SessionResult;
use crate::store::CartRepository;

/// A user's cart with write-through persistence.
pub struct CartStore<R: CartRepository> {
    user_id: String,
    repo: R,
    cart: Cart,
}

impl<R: CartRepository> CartStore<R> {
    /// Loads (or lazily creates) the cart for a user identity.
    ///
    /// Persisted records are normalized at this boundary: missing display
    /// fields get defaults, non-positive quantities lift to 1. A user with
    /// no stored cart starts empty.
    pub async fn load(repo: R, user_id: impl Into<String>) -> SessionResult<Self> {
        let user_id = user_id.into();
        let records = repo.load_cart(&user_id).await?;
        let cart = Cart::from_records(records);

        debug!(user_id = %user_id, lines = cart.len(), "cart loaded");

        Ok(CartStore {
            user_id,
            repo,
            cart,
        })
    }

    /// Adds one unit of a catalog product.
    ///
    /// Merge semantics: a product already in the cart gains quantity, a new
    /// product gets a fresh line at quantity 1.
    pub async fn add_product(&mut self, product: &Product) -> SessionResult<()> {
        self.add(LineItem::from_product(product)).await
    }

    /// Adds a line item, merging by product id.
    pub async fn add(&mut self, item: LineItem) -> SessionResult<()> {
        let product_id = item.product_id.clone();

        let mut next = self.cart.clone();
        next.add(item);
        self.commit(next).await?;

        debug!(user_id = %self.user_id, product_id = %product_id, "cart add");
        Ok(())
    }

    /// Removes a line by product id. Absent products are a no-op, not an
    /// error.
    pub async fn remove(&mut self, product_id: &str) -> SessionResult<()> {
        self.repo.delete_cart_item(&self.user_id, product_id).await?;

        if self.cart.remove(product_id) {
            debug!(user_id = %self.user_id, product_id = %product_id, "cart remove");
        }
        Ok(())
    }

    /// Overwrites the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: equivalent to [`CartStore::remove`]
    /// - Product not in cart: logged and ignored (the storefront's quantity
    ///   widget can race a removal, and inserting a line here would
    ///   resurrect it)
    pub async fn set_quantity(&mut self, product_id: &str, quantity: i64) -> SessionResult<()> {
        if quantity <= 0 {
            return self.remove(product_id).await;
        }

        let mut next = self.cart.clone();
        match next.set_quantity(product_id, quantity) {
            Ok(()) => {}
            Err(CoreError::ItemNotInCart(_)) => {
                warn!(
                    user_id = %self.user_id,
                    product_id = %product_id,
                    "quantity update for product not in cart, ignoring"
                );
                return Ok(());
            }
            Err(CoreError::Validation(err)) => return Err(err.into()),
        }
        self.commit(next).await?;

        debug!(
            user_id = %self.user_id,
            product_id = %product_id,
            quantity,
            "cart quantity set"
        );
        Ok(())
    }

    /// Empties the cart, locally and remotely.
    pub async fn clear(&mut self) -> SessionResult<()> {
        self.repo.delete_cart(&self.user_id).await?;
        self.cart.clear();

        debug!(user_id = %self.user_id, "cart cleared");
        Ok(())
    }

    /// Current lines, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Pricing summary under the given settings. Recomputed from live state
    /// on every call; nothing is cached.
    pub fn totals(&self, settings: &ShippingSettings) -> CartTotals {
        pricing::quote(self.cart.items(), settings)
    }

    /// The user identity this cart belongs to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The underlying cart value, for checkout validation.
    pub(crate) fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Remote write first, local commit only on success.
    async fn commit(&mut self, next: Cart) -> SessionResult<()> {
        self.repo.save_cart(&self.user_id, next.items()).await?;
        self.cart = next;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
