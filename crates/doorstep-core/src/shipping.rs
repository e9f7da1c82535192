//! # Shipping Policy
//!
//! The fee rule applied on top of a cart subtotal.
//!
//! ## Decision Table
//! ```text
//! enabled  threshold  subtotal >= threshold   fee
//! ───────  ─────────  ─────────────────────  ─────────────
//! false    any        any                    $0.00
//! true     > 0        yes                    $0.00  (waived)
//! true     > 0        no                     settings.fee
//! true     0          n/a (rule disabled)    settings.fee
//! ```
//!
//! Deterministic given its two inputs, no side effects.

use crate::money::Money;
use crate::types::ShippingSettings;

/// Computes the shipping fee for a given subtotal.
///
/// ## Panics
/// A negative subtotal is a programming error upstream (subtotals are sums
/// of non-negative line totals) and fails fast rather than producing a
/// quietly wrong quote.
///
/// ## Example
/// ```rust
/// use doorstep_core::money::Money;
/// use doorstep_core::shipping::compute_shipping_fee;
/// use doorstep_core::types::ShippingSettings;
///
/// let settings = ShippingSettings {
///     fee_cents: 300,
///     free_threshold_cents: 3000,
///     enabled: true,
/// };
///
/// assert_eq!(compute_shipping_fee(Money::from_cents(2550), &settings).cents(), 300);
/// assert_eq!(compute_shipping_fee(Money::from_cents(3000), &settings).cents(), 0);
/// ```
pub fn compute_shipping_fee(subtotal: Money, settings: &ShippingSettings) -> Money {
    assert!(
        !subtotal.is_negative(),
        "shipping fee requested for negative subtotal {subtotal}"
    );

    if !settings.enabled {
        return Money::zero();
    }

    if settings.free_threshold_cents > 0 && subtotal >= settings.free_threshold() {
        return Money::zero();
    }

    settings.fee()
}

// =============================================================================
// Unit Tests
// =============================================================================
