//! # Domain Types
//!
//! Core domain types for the Doorstep storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │     Product      │   │     LineItem     │   │  OrderSnapshot   │
//! │  ──────────────  │   │  ──────────────  │   │  ──────────────  │
//! │  id (UUID)       │──►│  product_id      │──►│  order_number    │
//! │  name            │   │  name (frozen)   │   │  customer        │
//! │  price_cents     │   │  unit_price_cents│   │  items (frozen)  │
//! │  in_stock        │   │  quantity        │   │  totals + status │
//! └──────────────────┘   └──────────────────┘   └──────────────────┘
//!
//! ShippingSettings: process-wide singleton, admin-mutated, read by pricing.
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` freezes the product's name and price at the moment it enters
//! a cart, and an `OrderSnapshot` freezes the whole cart plus computed totals
//! at the moment of checkout. Later catalog edits or cart mutations never
//! reach back into a placed order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the storefront.
    pub name: String,

    /// Longer description for the product page.
    pub description: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Reference to the product image (path or URL).
    pub image: String,

    /// Optional reference to a product video.
    pub video: Option<String>,

    /// Catalog category, "General" when unset.
    pub category: String,

    /// Whether the product can currently be ordered.
    pub in_stock: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line in a cart or order.
///
/// Carries a frozen copy of the product's display data so carts and orders
/// stay consistent even if the catalog entry changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID this line refers to.
    pub product_id: String,

    /// Product name at the time it was added (frozen).
    pub name: String,

    /// Unit price in cents at the time it was added (frozen).
    pub unit_price_cents: i64,

    /// Image reference for display (frozen).
    pub image: String,

    /// Quantity of this product. Always >= 1 while the line exists; a
    /// quantity update to zero removes the line instead.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item from a catalog product at quantity 1.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Checkout contact details, captured into the order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Free-form delivery notes.
    pub notes: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// Delivery status of a placed order.
///
/// The expected progression is
/// `pending → confirmed → preparing → out-for-delivery → delivered`, with
/// `cancelled` reachable from any non-terminal state. Nothing in this core
/// enforces that ordering: admin updates are single-step overwrites, and the
/// permissiveness is deliberate (manual override is a legitimate admin
/// action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The wire/storage representation, e.g. `out-for-delivery`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the order has reached an end state.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "out-for-delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

// =============================================================================
// Order Snapshot
// =============================================================================

/// An immutable record of a completed checkout.
///
/// Created exactly once per checkout. Only `status` changes afterwards, and
/// only through admin actions; cart mutations never touch a placed order
/// (there is no back-reference to the live cart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable order number, unique across orders.
    pub order_number: String,

    /// Customer contact details at checkout time.
    pub customer: CustomerInfo,

    /// Line items copied by value from the cart, in cart order.
    pub items: Vec<LineItem>,

    /// Sum of line totals at the moment of placement.
    pub subtotal_cents: i64,

    /// Shipping fee charged at the moment of placement.
    pub shipping_fee_cents: i64,

    /// subtotal + shipping fee.
    pub total_cents: i64,

    /// Delivery status, starts at `Pending`.
    pub status: OrderStatus,

    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl OrderSnapshot {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Shipping Settings
// =============================================================================

/// Process-wide shipping configuration.
///
/// A singleton mutated only by admin actions; every pricing call receives the
/// current value explicitly rather than reading an ambient global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSettings {
    /// Flat shipping fee in cents.
    pub fee_cents: i64,

    /// Subtotal at or above which shipping is free. 0 disables the rule.
    pub free_threshold_cents: i64,

    /// Master switch; when false no fee is ever charged.
    pub enabled: bool,
}

impl ShippingSettings {
    /// Returns the fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }

    /// Returns the free-shipping threshold as Money.
    #[inline]
    pub fn free_threshold(&self) -> Money {
        Money::from_cents(self.free_threshold_cents)
    }
}

/// Documented defaults when no settings record exists yet:
/// no fee, no threshold, shipping enabled.
impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            fee_cents: 0,
            free_threshold_cents: 0,
            enabled: true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_total() {
        let line = LineItem {
            product_id: "p1".to_string(),
            name: "Extension Cord".to_string(),
            unit_price_cents: 550,
            image: String::new(),
            quantity: 3,
        };
        assert_eq!(line.line_total().cents(), 1650);
    }

    #[test]
    fn test_order_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(OrderStatus::OutForDelivery.as_str(), "out-for-delivery");
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn test_shipping_settings_defaults() {
        let settings = ShippingSettings::default();
        assert_eq!(settings.fee_cents, 0);
        assert_eq!(settings.free_threshold_cents, 0);
        assert!(settings.enabled);
    }
}
