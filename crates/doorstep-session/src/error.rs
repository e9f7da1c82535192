//! # Session Error Types
//!
//! ## Error Flow
//! ```text
//! DbError (doorstep-db) ──► PersistenceError ──► SessionError ──► caller
//!                                                    ▲
//! ValidationError (doorstep-core) ───────────────────┘
//! ```
//!
//! `ValidationError` means the request was rejected before any remote call;
//! `PersistenceError` means a remote call was attempted and failed, and the
//! local cart state was left unchanged. No built-in retry: one attempt per
//! operation, the caller owns retry policy.

use thiserror::Error;

use doorstep_core::ValidationError;

// =============================================================================
// Persistence Error
// =============================================================================

/// A remote save/load/delete failed.
///
/// Storage implementations wrap their own error type into this at the
/// contract boundary so the session layer stays backend-agnostic.
#[derive(Debug, Error)]
#[error("persistence failure: {message}")]
pub struct PersistenceError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PersistenceError {
    /// Creates an error with a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        PersistenceError {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying backend error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PersistenceError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// =============================================================================
// Session Error
// =============================================================================

/// What a cart session or checkout surfaces to its caller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Rejected before any remote effect (missing checkout fields,
    /// empty cart, invalid quantity input).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A remote write or read failed; local state is unchanged.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_display() {
        let err = PersistenceError::new("cart save rejected");
        assert_eq!(err.to_string(), "persistence failure: cart save rejected");
    }

    #[test]
    fn test_validation_passes_through() {
        let err: SessionError = ValidationError::EmptyCart.into();
        assert_eq!(err.to_string(), "cart is empty");
    }
}
