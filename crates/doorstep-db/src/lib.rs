//! # doorstep-db: Database Layer for Doorstep
//!
//! SQLite persistence for the storefront core, using sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Doorstep Data Flow                          │
//! │                                                                  │
//! │  doorstep-session (CartStore / OrderAssembler / SettingsStore)   │
//! │       │                                                          │
//! │       │  CartRepository / OrderRepository / SettingsRepository   │
//! │       ▼                                                          │
//! │  ┌──────────────────────────────────────────────────────────┐    │
//! │  │                doorstep-db (THIS CRATE)                  │    │
//! │  │                                                          │    │
//! │  │  ┌────────────┐   ┌────────────────┐   ┌─────────────┐   │    │
//! │  │  │  Database  │   │  Repositories  │   │ Migrations  │   │    │
//! │  │  │ (pool.rs)  │◄──│ cart, order,   │   │ (embedded)  │   │    │
//! │  │  │            │   │ settings,      │   │ 001_init    │   │    │
//! │  │  │ SqlitePool │   │ product        │   │ .sql        │   │    │
//! │  │  └────────────┘   └────────────────┘   └─────────────┘   │    │
//! │  └──────────────────────────────────────────────────────────┘    │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  SQLite database file (WAL mode)                                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doorstep_db::{Database, DbConfig};
//! use doorstep_session::CartStore;
//!
//! let db = Database::new(DbConfig::new("path/to/doorstep.db")).await?;
//! let mut cart = CartStore::load(db.carts(), "user-1").await?;
//! cart.add_product(&product).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::SqliteCartRepository;
pub use repository::favorites::SqliteFavoritesRepository;
pub use repository::order::SqliteOrderRepository;
pub use repository::product::ProductRepository;
pub use repository::settings::SqliteSettingsRepository;

// =============================================================================
// Integration Tests (session flows over SQLite)
// =============================================================================
