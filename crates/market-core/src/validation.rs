//! # Validation Module
//!
//! Input validation for the marketplace ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Order                                   │
//! │                                                                         │
//! │  Every mutating operation on the machine runs:                         │
//! │                                                                         │
//! │  1. Service gate check        (is the machine enabled at all?)         │
//! │  2. Capability check          (does the caller hold the role?)         │
//! │  3. THIS MODULE               (are the arguments well-formed?)         │
//! │  4. Domain checks             (stock, balance, duplicates)             │
//! │  5. Mutation + event append   (only if 1-4 all passed)                 │
//! │                                                                         │
//! │  Nothing in steps 1-4 touches state: a failure at any step leaves      │
//! │  the machine byte-for-byte unchanged                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Amount;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// Uniqueness is a catalog concern, checked against live state in
/// [`crate::catalog::Catalog::insert`].
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_product_name;
///
/// assert!(validate_product_name("widget").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be positive (> 0); free products are not representable
pub fn validate_price(price: Amount) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive { field: "price" });
    }

    Ok(())
}

/// Validates a withdrawal amount.
///
/// ## Rules
/// - Must be positive (> 0); a zero withdrawal is meaningless and rejected
///   before the balance is even consulted
pub fn validate_withdrawal_amount(amount: Amount) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive { field: "amount" });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("widget").is_ok());
        assert!(validate_product_name("your life will never be the same").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Amount::from_units(1)).is_ok());
        assert!(validate_price(Amount::from_units(1_000_000_000_000)).is_ok());
        assert!(validate_price(Amount::zero()).is_err());
    }

    #[test]
    fn test_validate_withdrawal_amount() {
        assert!(validate_withdrawal_amount(Amount::from_units(1)).is_ok());
        assert!(validate_withdrawal_amount(Amount::zero()).is_err());
    }
}
