//! # Validation Module
//!
//! Input validation for checkout and catalog data.
//!
//! ## Validation Strategy
//! Checkout fields are validated here, before any remote call is attempted:
//! a rejected checkout must have no persistence side effects. Catalog field
//! checks back the admin product forms. The database adds its own NOT NULL
//! and UNIQUE constraints underneath as a second layer.

use crate::cart::Cart;
use crate::error::ValidationError;
use crate::types::CustomerInfo;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates customer contact details for checkout.
///
/// ## Rules
/// Name, phone, and address must be non-empty after trimming. Notes are
/// optional and unconstrained.
///
/// ## Example
/// ```rust
/// use doorstep_core::types::CustomerInfo;
/// use doorstep_core::validation::validate_customer;
///
/// let customer = CustomerInfo {
///     name: "Amal K".to_string(),
///     phone: "78922256".to_string(),
///     address: "12 Harbour Rd".to_string(),
///     notes: None,
/// };
/// assert!(validate_customer(&customer).is_ok());
/// ```
pub fn validate_customer(customer: &CustomerInfo) -> ValidationResult<()> {
    require_non_empty("name", &customer.name)?;
    require_non_empty("phone", &customer.phone)?;
    require_non_empty("address", &customer.address)?;
    Ok(())
}

/// Validates the full checkout precondition: non-empty cart, complete
/// customer details.
pub fn validate_checkout(cart: &Cart, customer: &CustomerInfo) -> ValidationResult<()> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    validate_customer(customer)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a quantity value for an explicit quantity input.
///
/// ## Rules
/// - Must be positive (> 0); zero goes through the remove path instead
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Amal K".to_string(),
            phone: "78922256".to_string(),
            address: "12 Harbour Rd".to_string(),
            notes: Some("ring twice".to_string()),
        }
    }

    #[test]
    fn test_validate_customer() {
        assert!(validate_customer(&customer()).is_ok());

        let mut missing_phone = customer();
        missing_phone.phone = "   ".to_string();
        let err = validate_customer(&missing_phone).unwrap_err();
        assert!(matches!(err, ValidationError::Required { field } if field == "phone"));

        let mut missing_address = customer();
        missing_address.address = String::new();
        assert!(validate_customer(&missing_address).is_err());
    }

    #[test]
    fn test_validate_checkout_rejects_empty_cart() {
        let cart = Cart::new();
        let err = validate_checkout(&cart, &customer()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyCart));
    }

    #[test]
    fn test_validate_checkout_accepts_full_cart() {
        let mut cart = Cart::new();
        cart.add(LineItem {
            product_id: "A".to_string(),
            name: "Bulb".to_string(),
            unit_price_cents: 250,
            image: String::new(),
            quantity: 1,
        });
        assert!(validate_checkout(&cart, &customer()).is_ok());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("LED Strip 5m").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }
}
