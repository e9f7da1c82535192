//! # Repository Module
//!
//! SQLite repository implementations for Doorstep.
//!
//! ## Repository Pattern
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                Repository Pattern Explained                    │
//! │                                                                │
//! │  Session flow (CartStore, OrderAssembler, SettingsStore)       │
//! │       │                                                        │
//! │       │  async trait call (CartRepository::save_cart, ...)     │
//! │       ▼                                                        │
//! │  SqliteCartRepository / SqliteOrderRepository / ...            │
//! │       │                                                        │
//! │       │  SQL query                                             │
//! │       ▼                                                        │
//! │  SQLite Database                                               │
//! │                                                                │
//! │  The cart, order, and settings repositories implement the      │
//! │  contracts defined in doorstep-session, so the same session    │
//! │  logic runs over SQLite or the in-memory test store. The       │
//! │  product repository is a direct catalog API with no contract   │
//! │  behind it (only the admin back office calls it).              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`cart::SqliteCartRepository`] - Per-user cart lines
//! - [`order::SqliteOrderRepository`] - Order snapshots and status
//! - [`favorites::SqliteFavoritesRepository`] - Per-user favorites
//! - [`settings::SqliteSettingsRepository`] - Shipping settings singleton
//! - [`product::ProductRepository`] - Product catalog CRUD and search

pub mod cart;
pub mod favorites;
pub mod order;
pub mod product;
pub mod settings;
