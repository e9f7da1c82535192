//! # Checkout
//!
//! Turns a validated cart into an immutable [`OrderSnapshot`] and hands it to
//! the order repository.
//!
//! ## Flow
//! ```text
//! place_order(cart, customer, settings)
//!      │
//!      ▼
//! validate ── rejected ──► ValidationError, zero remote calls
//!      │
//!      ▼
//! snapshot: freeze items + compute totals + assign id / order number
//!      │
//!      ▼
//! save_order ── fails ──► PersistenceError, cart untouched
//!      │
//!      ▼
//! clear cart ── fails ──► logged warning, order still stands
//!      │
//!      ▼
//! return snapshot
//! ```
//!
//! The one deliberate asymmetry: once the order is saved it is the source of
//! truth, so a failure while clearing the cart afterwards is logged and
//! swallowed rather than surfaced. The customer placed their order; a stale
//! cart is an annoyance, not a lost sale.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use doorstep_core::pricing;
use doorstep_core::types::{CustomerInfo, OrderSnapshot, OrderStatus, ShippingSettings};
use doorstep_core::validation::validate_checkout;

use crate::cart_store::CartStore;
use crate::error::SessionResult;
use crate::store::{CartRepository, OrderRepository};

/// Builds and persists order snapshots from carts.
pub struct OrderAssembler<O: OrderRepository> {
    orders: O,
}

impl<O: OrderRepository> OrderAssembler<O> {
    /// Wraps an order repository.
    pub fn new(orders: O) -> Self {
        OrderAssembler { orders }
    }

    /// Places an order from the given cart.
    ///
    /// Totals are computed once here, from the cart lines and the settings in
    /// force at this moment, and frozen into the snapshot. The cart is
    /// cleared after the order is safely stored.
    ///
    /// ## Behavior
    /// - Empty cart or incomplete customer details: `ValidationError`, no
    ///   remote call is made
    /// - Order save fails: `PersistenceError`, the cart keeps its items
    /// - Cart clear fails after a successful save: warning logged, the order
    ///   is returned anyway
    pub async fn place_order<R: CartRepository>(
        &self,
        cart: &mut CartStore<R>,
        customer: CustomerInfo,
        settings: &ShippingSettings,
    ) -> SessionResult<OrderSnapshot> {
        validate_checkout(cart.cart(), &customer)?;

        let totals = pricing::quote(cart.items(), settings);
        let order = OrderSnapshot {
            id: Uuid::new_v4().to_string(),
            order_number: generate_order_number(),
            customer,
            items: cart.items().to_vec(),
            subtotal_cents: totals.subtotal_cents,
            shipping_fee_cents: totals.shipping_fee_cents,
            total_cents: totals.total_cents,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        self.orders.save_order(&order).await?;

        info!(
            order_number = %order.order_number,
            user_id = %cart.user_id(),
            total_cents = order.total_cents,
            "order placed"
        );

        if let Err(err) = cart.clear().await {
            warn!(
                order_number = %order.order_number,
                user_id = %cart.user_id(),
                error = %err,
                "cart clear failed after order save, order stands"
            );
        }

        Ok(order)
    }

    /// Overwrites the status of a placed order (admin action).
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> SessionResult<()> {
        self.orders.update_order_status(order_id, status).await?;
        info!(order_id = %order_id, status = %status, "order status updated");
        Ok(())
    }

    /// All placed orders, newest first.
    pub async fn list_orders(&self) -> SessionResult<Vec<OrderSnapshot>> {
        Ok(self.orders.list_orders().await?)
    }

    /// One order by id.
    pub async fn get_order(&self, order_id: &str) -> SessionResult<Option<OrderSnapshot>> {
        Ok(self.orders.get_order(order_id).await?)
    }

    /// Removes an order entirely (admin action).
    pub async fn delete_order(&self, order_id: &str) -> SessionResult<()> {
        self.orders.delete_order(order_id).await?;
        info!(order_id = %order_id, "order deleted");
        Ok(())
    }
}

/// Generates a human-readable order number: `ORD-<unix millis>-<4 hex>`.
///
/// The millisecond timestamp keeps numbers roughly sortable by placement
/// time; the random suffix keeps two orders in the same millisecond from
/// colliding.
fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{millis}-{}", &suffix[..4])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::memory::MemoryStore;
    use chrono::Utc;
    use doorstep_core::types::Product;
    use doorstep_core::ValidationError;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            price_cents,
            image: String::new(),
            video: None,
            category: "General".to_string(),
            in_stock: true,
            created_at: Utc::now(),
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Amal K".to_string(),
            phone: "78922256".to_string(),
            address: "12 Harbour Rd".to_string(),
            notes: None,
        }
    }

    fn settings() -> ShippingSettings {
        ShippingSettings {
            fee_cents: 300,
            free_threshold_cents: 3000,
            enabled: true,
        }
    }

    async fn loaded_cart(store: &MemoryStore) -> CartStore<MemoryStore> {
        let mut cart = CartStore::load(store.clone(), "u1").await.unwrap();
        cart.add_product(&product("A", 1000)).await.unwrap();
        cart.set_quantity("A", 2).await.unwrap();
        cart.add_product(&product("B", 550)).await.unwrap();
        cart
    }

    #[tokio::test]
    async fn test_place_order_freezes_totals_and_clears_cart() {
        let store = MemoryStore::new();
        let mut cart = loaded_cart(&store).await;
        let assembler = OrderAssembler::new(store.clone());

        let order = assembler
            .place_order(&mut cart, customer(), &settings())
            .await
            .unwrap();

        assert_eq!(order.subtotal_cents, 2550);
        assert_eq!(order.shipping_fee_cents, 300);
        assert_eq!(order.total_cents, 2850);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert!(order.order_number.starts_with("ORD-"));

        assert!(cart.is_empty());
        assert!(store.stored_cart("u1").is_empty());
        assert_eq!(store.order_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_before_any_remote_call() {
        let store = MemoryStore::new();
        let mut cart = CartStore::load(store.clone(), "u1").await.unwrap();
        let assembler = OrderAssembler::new(store.clone());

        let err = assembler
            .place_order(&mut cart, customer(), &settings())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::EmptyCart)
        ));
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_phone_is_rejected_with_cart_intact() {
        let store = MemoryStore::new();
        let mut cart = loaded_cart(&store).await;
        let assembler = OrderAssembler::new(store.clone());

        let mut bad = customer();
        bad.phone = "  ".to_string();
        let err = assembler
            .place_order(&mut cart, bad, &settings())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::Required { ref field }) if field == "phone"
        ));
        assert_eq!(store.order_count(), 0);
        assert_eq!(cart.items().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_cart() {
        let store = MemoryStore::new();
        let mut cart = loaded_cart(&store).await;
        let assembler = OrderAssembler::new(store.clone());

        store.fail_writes(true);
        let err = assembler
            .place_order(&mut cart, customer(), &settings())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Persistence(_)));
        assert_eq!(store.order_count(), 0);
        assert_eq!(cart.items().len(), 2);
    }

    #[tokio::test]
    async fn test_later_edits_never_reach_a_placed_order() {
        let store = MemoryStore::new();
        let mut cart = loaded_cart(&store).await;
        let assembler = OrderAssembler::new(store.clone());

        let placed = assembler
            .place_order(&mut cart, customer(), &settings())
            .await
            .unwrap();

        cart.add_product(&product("C", 9999)).await.unwrap();

        let stored = assembler.get_order(&placed.id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.total_cents, 2850);
    }

    #[tokio::test]
    async fn test_status_updates_are_single_step_overwrites() {
        let store = MemoryStore::new();
        let mut cart = loaded_cart(&store).await;
        let assembler = OrderAssembler::new(store.clone());
        let order = assembler
            .place_order(&mut cart, customer(), &settings())
            .await
            .unwrap();

        assembler
            .update_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        // Permissive by design: moving backwards is allowed
        assembler
            .update_status(&order.id, OrderStatus::Preparing)
            .await
            .unwrap();

        let stored = assembler.get_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Preparing);

        assert!(assembler
            .update_status("nope", OrderStatus::Confirmed)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let store = MemoryStore::new();
        let assembler = OrderAssembler::new(store.clone());

        for user in ["u1", "u2"] {
            let mut cart = CartStore::load(store.clone(), user).await.unwrap();
            cart.add_product(&product("A", 1000)).await.unwrap();
            assembler
                .place_order(&mut cart, customer(), &settings())
                .await
                .unwrap();
        }

        let listed = assembler.list_orders().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let store = MemoryStore::new();
        let mut cart = loaded_cart(&store).await;
        let assembler = OrderAssembler::new(store.clone());
        let order = assembler
            .place_order(&mut cart, customer(), &settings())
            .await
            .unwrap();

        assembler.delete_order(&order.id).await.unwrap();
        assert!(assembler.get_order(&order.id).await.unwrap().is_none());
        assert!(assembler.delete_order(&order.id).await.is_err());
    }

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.splitn(3, '-').collect();
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), 4);
    }
}
