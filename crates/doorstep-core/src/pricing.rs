//! # Pricing Engine
//!
//! Derives subtotal, shipping fee, and grand total from cart lines.
//!
//! ## Pricing Flow
//! ```text
//! Cart lines ──► subtotal() ──► compute_shipping_fee() ──► total()
//!                   │                    │                    │
//!                   └────────────────────┴────────────────────┘
//!                              quote() -> CartTotals
//! ```
//!
//! All functions are pure reads over the lines passed in; nothing is cached.
//! Each call recomputes from live cart state, which is fine because carts
//! are small (bounded by how many products a person adds by hand).

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::shipping::compute_shipping_fee;
use crate::types::{LineItem, ShippingSettings};

/// Sum of line totals, before shipping.
///
/// A negative persisted unit price (corrupt record) contributes zero rather
/// than dragging the subtotal down.
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(|i| i.line_total().max_zero()).sum()
}

/// Shipping fee for these lines under the given settings.
pub fn shipping_fee(items: &[LineItem], settings: &ShippingSettings) -> Money {
    compute_shipping_fee(subtotal(items), settings)
}

/// Grand total: subtotal + shipping fee.
pub fn total(items: &[LineItem], settings: &ShippingSettings) -> Money {
    subtotal(items) + shipping_fee(items, settings)
}

/// Total quantity across all lines (the cart badge number).
pub fn item_count(items: &[LineItem]) -> i64 {
    items.iter().map(|i| i.quantity).sum()
}

// =============================================================================
// Cart Totals
// =============================================================================

/// One-pass summary of everything the checkout screen needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Total quantity across lines.
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub shipping_fee_cents: i64,
    pub total_cents: i64,
}

/// Computes a [`CartTotals`] summary for the given lines and settings.
pub fn quote(items: &[LineItem], settings: &ShippingSettings) -> CartTotals {
    let subtotal = subtotal(items);
    let fee = compute_shipping_fee(subtotal, settings);

    CartTotals {
        item_count: item_count(items),
        subtotal_cents: subtotal.cents(),
        shipping_fee_cents: fee.cents(),
        total_cents: (subtotal + fee).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price_cents: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            unit_price_cents: price_cents,
            image: String::new(),
            quantity,
        }
    }

    fn settings(fee: i64, threshold: i64, enabled: bool) -> ShippingSettings {
        ShippingSettings {
            fee_cents: fee,
            free_threshold_cents: threshold,
            enabled,
        }
    }

    // Scenario from the storefront: A = $10.00 × 2, B = $5.50 × 1,
    // fee $3.00, free over $30.00 → subtotal $25.50, fee charged.
    #[test]
    fn test_quote_below_threshold() {
        let items = vec![line("A", 1000, 2), line("B", 550, 1)];
        let totals = quote(&items, &settings(300, 3000, true));

        assert_eq!(totals.subtotal_cents, 2550);
        assert_eq!(totals.shipping_fee_cents, 300);
        assert_eq!(totals.total_cents, 2850);
        assert_eq!(totals.item_count, 3);
    }

    // Same cart, threshold lowered to $20.00 → fee waived.
    #[test]
    fn test_quote_threshold_reached() {
        let items = vec![line("A", 1000, 2), line("B", 550, 1)];
        let totals = quote(&items, &settings(300, 2000, true));

        assert_eq!(totals.shipping_fee_cents, 0);
        assert_eq!(totals.total_cents, 2550);
    }

    #[test]
    fn test_total_is_subtotal_plus_fee() {
        let items = vec![line("A", 1234, 3), line("B", 1, 7)];
        for s in [
            settings(300, 0, true),
            settings(300, 5000, true),
            settings(300, 1, true),
            settings(300, 3000, false),
        ] {
            assert_eq!(
                total(&items, &s),
                subtotal(&items) + shipping_fee(&items, &s)
            );
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = quote(&[], &settings(300, 0, true));
        assert_eq!(totals.subtotal_cents, 0);
        // An empty cart still quotes the fee; checkout refuses it anyway.
        assert_eq!(totals.shipping_fee_cents, 300);
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_negative_price_coerced_to_zero() {
        let items = vec![line("A", -500, 2), line("B", 1000, 1)];
        assert_eq!(subtotal(&items).cents(), 1000);
    }
}
