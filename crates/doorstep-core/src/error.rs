//! # Error Types
//!
//! Domain-specific error types for doorstep-core.
//!
//! ## Error Hierarchy
//! ```text
//! doorstep-core errors (this file)
//! ├── CoreError        - Cart/domain rule violations
//! └── ValidationError  - Checkout input validation failures
//!
//! doorstep-session errors (separate crate)
//! ├── PersistenceError - Remote store failures
//! └── SessionError     - What a cart session surfaces to callers
//!
//! doorstep-db errors (separate crate)
//! └── DbError          - Database operation failures
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, field name)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent domain rule violations. They are recoverable: the caller
/// decides whether to surface them or (for [`CoreError::ItemNotInCart`])
/// deliberately ignore them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quantity update targeted a product that is not in the cart.
    ///
    /// The storefront treats this as a non-fatal race (the line was removed
    /// in another tab, say) and the session layer logs and ignores it.
    #[error("product {0} is not in the cart")]
    ItemNotInCart(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, checked before any
/// remote call is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty (after trimming).
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
