//! # doorstep-core: Pure Business Logic for the Doorstep Storefront
//!
//! This crate is the heart of Doorstep. It contains all business logic as
//! pure functions and value types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Doorstep Architecture                           │
//! │                                                                 │
//! │   Storefront / admin clients (out of scope)                     │
//! │        │                                                        │
//! │        ▼                                                        │
//! │   doorstep-session ── CartStore, OrderAssembler, contracts      │
//! │        │                                                        │
//! │        ▼                                                        │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │            ★ doorstep-core (THIS CRATE) ★               │    │
//! │  │                                                         │    │
//! │  │   types • money • cart • shipping • pricing             │    │
//! │  │   validation • error                                    │    │
//! │  │                                                         │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS    │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │        ▲                                                        │
//! │        │ (types only)                                           │
//! │   doorstep-db ── SQLite repositories                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, OrderSnapshot, ...)
//! - [`money`] - Money type with integer-cents arithmetic (no floats!)
//! - [`cart`] - The cart value type with merge-by-product-id semantics
//! - [`shipping`] - The free-shipping-threshold fee policy
//! - [`pricing`] - Subtotal / fee / total derivation
//! - [`validation`] - Checkout and catalog input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output, every time
//! 2. **No I/O**: database, network, and file access are forbidden here
//! 3. **Integer money**: all monetary values are cents in an i64
//! 4. **Explicit errors**: typed errors, never strings or panics (the one
//!    exception is the fail-fast negative-subtotal assertion in `shipping`)
//!
//! ## Example
//!
//! ```rust
//! use doorstep_core::cart::Cart;
//! use doorstep_core::pricing;
//! use doorstep_core::types::{LineItem, ShippingSettings};
//!
//! let mut cart = Cart::new();
//! cart.add(LineItem {
//!     product_id: "p1".to_string(),
//!     name: "Extension Cord".to_string(),
//!     unit_price_cents: 1000,
//!     image: String::new(),
//!     quantity: 1,
//! });
//!
//! let settings = ShippingSettings { fee_cents: 300, free_threshold_cents: 3000, enabled: true };
//! let totals = pricing::quote(cart.items(), &settings);
//! assert_eq!(totals.total_cents, 1300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod shipping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow `use doorstep_core::Money` instead of
// `use doorstep_core::money::Money`.

pub use cart::{Cart, CartRecord};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::CartTotals;
pub use types::*;
