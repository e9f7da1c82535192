//! # Cart Value Type
//!
//! The in-memory shopping cart: an insertion-ordered list of line items,
//! unique by product id.
//!
//! ## Cart Operations
//! ```text
//! add(item)              ──► merge by product id, or append a new line
//! set_quantity(id, qty)  ──► overwrite; qty <= 0 removes the line
//! remove(id)             ──► delete the line; absent id is a no-op
//! clear()                ──► empty the cart
//! from_records(records)  ──► normalize loosely-persisted records on load
//! ```
//!
//! This type is pure state. Persistence (write-through to the remote store)
//! is layered on top by `doorstep_session::CartStore`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::LineItem;

// =============================================================================
// Cart Record (load boundary)
// =============================================================================

/// A cart line as it comes back from the store, before normalization.
///
/// The backing store keeps carts as loose documents, so any display field may
/// be absent on an old or partially-written record. Normalization happens
/// here, once, at the load boundary, instead of scattering `unwrap_or`
/// defaults through every read path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartRecord {
    pub product_id: String,
    pub name: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub image: Option<String>,
    pub quantity: Option<i64>,
}

impl CartRecord {
    /// Normalizes a raw record into a well-formed line item.
    ///
    /// Defaults: name → "Product", price → 0, image → empty, quantity → 1.
    /// A non-positive stored quantity is also lifted to 1, keeping the
    /// quantity >= 1 invariant for every line that exists.
    fn normalize(self) -> LineItem {
        LineItem {
            product_id: self.product_id,
            name: self.name.unwrap_or_else(|| "Product".to_string()),
            unit_price_cents: self.unit_price_cents.unwrap_or(0),
            image: self.image.unwrap_or_default(),
            quantity: match self.quantity {
                Some(q) if q >= 1 => q,
                _ => 1,
            },
        }
    }
}

impl From<&LineItem> for CartRecord {
    fn from(item: &LineItem) -> Self {
        CartRecord {
            product_id: item.product_id.clone(),
            name: Some(item.name.clone()),
            unit_price_cents: Some(item.unit_price_cents),
            image: Some(item.image.clone()),
            quantity: Some(item.quantity),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Every line has quantity >= 1 (updates to <= 0 remove the line)
/// - Iteration order is insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from persisted records, normalizing each one.
    ///
    /// Records with the same product id should not occur in well-formed
    /// storage; if they do, later records merge into the first.
    pub fn from_records(records: impl IntoIterator<Item = CartRecord>) -> Self {
        let mut cart = Cart::new();
        for record in records {
            let item = record.normalize();
            match cart.find_mut(&item.product_id) {
                Some(existing) => existing.quantity += item.quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds a line to the cart, merging by product id.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by the incoming line's
    ///   quantity
    /// - Product not in cart: a new line is appended at quantity 1 (the
    ///   storefront adds one unit per click; repeat adds accumulate)
    pub fn add(&mut self, item: LineItem) {
        match self.find_mut(&item.product_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(LineItem {
                quantity: 1,
                ..item
            }),
        }
    }

    /// Overwrites the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: equivalent to [`Cart::remove`]
    /// - Product not in cart: returns [`CoreError::ItemNotInCart`] (the
    ///   session layer logs and ignores this rather than inserting a line)
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }

        match self.find_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart(product_id.to_string())),
        }
    }

    /// Removes a line by product id. Absent ids are a no-op, not an error.
    ///
    /// Returns whether a line was actually removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the cart holds a line for the given product.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Borrow of a line by product id.
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// The lines, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
