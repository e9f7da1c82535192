//! # doorstep-session: Cart Sessions & Checkout Flows
//!
//! The per-user flows of the Doorstep storefront, written against abstract
//! storage contracts so the same logic runs over SQLite (doorstep-db) or the
//! in-memory backend shipped here.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │   Storefront / admin clients (out of scope)                  │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │         ★ doorstep-session (THIS CRATE) ★          │      │
//! │  │                                                    │      │
//! │  │  CartStore ──── write-through cart sessions        │      │
//! │  │  OrderAssembler ── checkout → OrderSnapshot        │      │
//! │  │  SettingsStore ── shipping settings admin          │      │
//! │  │                                                    │      │
//! │  │  contracts: CartRepository / OrderRepository /     │      │
//! │  │             FavoritesRepository /                  │      │
//! │  │             SettingsRepository (async traits)      │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │        │                            │                        │
//! │        ▼                            ▼                        │
//! │  doorstep-core (pure logic)   doorstep-db / MemoryStore      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The async storage contracts
//! - [`cart_store`] - One user's cart with write-through persistence
//! - [`checkout`] - Order placement and admin order operations
//! - [`settings`] - Shipping settings administration
//! - [`memory`] - In-memory implementation of every contract
//! - [`error`] - Session and persistence error types

pub mod cart_store;
pub mod checkout;
pub mod error;
pub mod memory;
pub mod settings;
pub mod store;

pub use cart_store::CartStore;
pub use checkout::OrderAssembler;
pub use error::{PersistenceError, SessionError, SessionResult};
pub use memory::MemoryStore;
pub use settings::SettingsStore;
pub use store::{
    CartRepository, FavoritesRepository, OrderRepository, SettingsRepository, StoreResult,
};
