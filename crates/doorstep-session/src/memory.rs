//! # In-Memory Store
//!
//! A mutex-backed implementation of every storage contract. Used by the
//! test suites in this crate, and handy anywhere a throwaway backend is
//! enough (demos, property checks).
//!
//! ## Failure Injection
//! `fail_writes(true)` makes every subsequent write operation return a
//! [`PersistenceError`] without touching stored state. The session layer's
//! atomicity contract (failed remote write ⇒ unchanged local cart) is
//! exercised through this switch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use doorstep_core::{CartRecord, LineItem, OrderSnapshot, OrderStatus, ShippingSettings};

use crate::error::PersistenceError;
use crate::store::{
    CartRepository, FavoritesRepository, OrderRepository, SettingsRepository, StoreResult,
};

#[derive(Debug, Default)]
struct Inner {
    carts: Mutex<HashMap<String, Vec<LineItem>>>,
    orders: Mutex<Vec<OrderSnapshot>>,
    favorites: Mutex<HashMap<String, Vec<String>>>,
    settings: Mutex<Option<ShippingSettings>>,
    fail_writes: AtomicBool,
}

/// In-memory backend implementing every storage contract.
///
/// Cheap to clone; clones share the same underlying state, mirroring how a
/// pooled database handle behaves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles write-failure injection.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored orders (test assertion helper).
    pub fn order_count(&self) -> usize {
        self.inner.orders.lock().expect("orders mutex poisoned").len()
    }

    /// Stored cart lines for a user (test assertion helper).
    pub fn stored_cart(&self, user_id: &str) -> Vec<LineItem> {
        self.inner
            .carts
            .lock()
            .expect("carts mutex poisoned")
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            Err(PersistenceError::new("injected write failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn load_cart(&self, user_id: &str) -> StoreResult<Vec<CartRecord>> {
        let carts = self.inner.carts.lock().expect("carts mutex poisoned");
        Ok(carts
            .get(user_id)
            .map(|items| items.iter().map(CartRecord::from).collect())
            .unwrap_or_default())
    }

    async fn save_cart(&self, user_id: &str, items: &[LineItem]) -> StoreResult<()> {
        self.check_write()?;
        let mut carts = self.inner.carts.lock().expect("carts mutex poisoned");
        carts.insert(user_id.to_string(), items.to_vec());
        Ok(())
    }

    async fn delete_cart_item(&self, user_id: &str, product_id: &str) -> StoreResult<()> {
        self.check_write()?;
        let mut carts = self.inner.carts.lock().expect("carts mutex poisoned");
        if let Some(items) = carts.get_mut(user_id) {
            items.retain(|i| i.product_id != product_id);
        }
        Ok(())
    }

    async fn delete_cart(&self, user_id: &str) -> StoreResult<()> {
        self.check_write()?;
        let mut carts = self.inner.carts.lock().expect("carts mutex poisoned");
        carts.remove(user_id);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn save_order(&self, order: &OrderSnapshot) -> StoreResult<()> {
        self.check_write()?;
        let mut orders = self.inner.orders.lock().expect("orders mutex poisoned");
        if orders.iter().any(|o| o.id == order.id || o.order_number == order.order_number) {
            return Err(PersistenceError::new(format!(
                "duplicate order {}",
                order.order_number
            )));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        self.check_write()?;
        let mut orders = self.inner.orders.lock().expect("orders mutex poisoned");
        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                Ok(())
            }
            None => Err(PersistenceError::new(format!("order {order_id} not found"))),
        }
    }

    async fn list_orders(&self) -> StoreResult<Vec<OrderSnapshot>> {
        let orders = self.inner.orders.lock().expect("orders mutex poisoned");
        let mut listed = orders.clone();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn get_order(&self, order_id: &str) -> StoreResult<Option<OrderSnapshot>> {
        let orders = self.inner.orders.lock().expect("orders mutex poisoned");
        Ok(orders.iter().find(|o| o.id == order_id).cloned())
    }

    async fn delete_order(&self, order_id: &str) -> StoreResult<()> {
        self.check_write()?;
        let mut orders = self.inner.orders.lock().expect("orders mutex poisoned");
        let before = orders.len();
        orders.retain(|o| o.id != order_id);
        if orders.len() == before {
            return Err(PersistenceError::new(format!("order {order_id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoritesRepository for MemoryStore {
    async fn add_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<()> {
        self.check_write()?;
        let mut favorites = self.inner.favorites.lock().expect("favorites mutex poisoned");
        let entries = favorites.entry(user_id.to_string()).or_default();
        if entries.iter().any(|id| id == product_id) {
            return Err(PersistenceError::new(format!(
                "product {product_id} is already a favorite"
            )));
        }
        entries.push(product_id.to_string());
        Ok(())
    }

    async fn remove_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<()> {
        self.check_write()?;
        let mut favorites = self.inner.favorites.lock().expect("favorites mutex poisoned");
        let entries = favorites.entry(user_id.to_string()).or_default();
        let before = entries.len();
        entries.retain(|id| id != product_id);
        if entries.len() == before {
            return Err(PersistenceError::new(format!(
                "favorite {product_id} not found"
            )));
        }
        Ok(())
    }

    async fn list_favorites(&self, user_id: &str) -> StoreResult<Vec<String>> {
        let favorites = self.inner.favorites.lock().expect("favorites mutex poisoned");
        Ok(favorites.get(user_id).cloned().unwrap_or_default())
    }

    async fn is_favorite(&self, user_id: &str, product_id: &str) -> StoreResult<bool> {
        let favorites = self.inner.favorites.lock().expect("favorites mutex poisoned");
        Ok(favorites
            .get(user_id)
            .is_some_and(|entries| entries.iter().any(|id| id == product_id)))
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn load_shipping_settings(&self) -> StoreResult<ShippingSettings> {
        let settings = self.inner.settings.lock().expect("settings mutex poisoned");
        Ok(settings.unwrap_or_default())
    }

    async fn save_shipping_settings(&self, new_settings: &ShippingSettings) -> StoreResult<()> {
        self.check_write()?;
        let mut settings = self.inner.settings.lock().expect("settings mutex poisoned");
        *settings = Some(*new_settings);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
