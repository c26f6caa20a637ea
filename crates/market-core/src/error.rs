//! # Error Types
//!
//! Domain-specific error types for market-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  MarketError       - Rejected operations (the machine's only failure   │
//! │                      mode; state is untouched when one is returned)    │
//! │  ValidationError   - Malformed input, caught before any business       │
//! │                      logic runs; converts into                          │
//! │                      MarketError::InvalidArguments                      │
//! │  TransferError     - Raised by the injected payment sink; surfaces     │
//! │                      as MarketError::TransferFailed                     │
//! │                                                                         │
//! │  Flow: ValidationError ──► MarketError ──► caller                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, amounts, identities)
//! 3. Errors are enum variants, never String
//! 4. A rejected operation leaves the machine in its prior valid state

use thiserror::Error;

use crate::money::Amount;
use crate::types::AccountId;

// =============================================================================
// Market Error
// =============================================================================

/// A rejected marketplace operation.
///
/// Every mutating entry point on [`crate::Market`] returns one of these on
/// failure. The contract: when a `MarketError` comes back, no state was
/// mutated — roles, catalog, balances, and the event log are exactly as they
/// were before the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketError {
    /// Caller lacks the role the operation requires.
    #[error("caller {caller} is not authorized: {required} required")]
    Unauthorized {
        caller: AccountId,
        /// Human-readable name of the required capability.
        required: &'static str,
    },

    /// A product referenced a merchant identity that is not registered.
    #[error("merchant {merchant} is not registered")]
    InvalidMerchant { merchant: AccountId },

    /// Malformed input caught before any business logic ran.
    #[error("invalid arguments: {0}")]
    InvalidArguments(#[from] ValidationError),

    /// Exact-name catalog lookup missed.
    #[error("product not found: {name}")]
    NotFound { name: String },

    /// The product exists but its stock is exhausted.
    #[error("product out of stock: {name}")]
    OutOfStock { name: String },

    /// Payment did not match the product price exactly.
    ///
    /// Both underpayment and overpayment are rejected; the machine does not
    /// make change and does not retain excess as proceeds.
    #[error("payment {offered} does not match price {required}")]
    InsufficientPayment { required: Amount, offered: Amount },

    /// Withdrawal amount exceeds the merchant's accrued balance
    /// (including the zero-balance case).
    #[error("withdrawal of {requested} exceeds balance {available}")]
    InsufficientBalance {
        available: Amount,
        requested: Amount,
    },

    /// The machine was constructed with the service flag off; all mutating
    /// operations are rejected.
    #[error("service is disabled")]
    ServiceDisabled,

    /// The injected payment sink refused the transfer. The ledger debit was
    /// never applied.
    #[error("external transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when arguments don't meet requirements. Used for early
/// validation before any business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Duplicate value (e.g., duplicate product name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// A balance or stock update would exceed the representable range.
    #[error("{field} arithmetic overflowed")]
    Overflow { field: &'static str },
}

// =============================================================================
// Transfer Error
// =============================================================================

/// Failure reported by a [`crate::payment::PaymentSink`].
///
/// The machine treats this exactly like a failed precondition: the whole
/// withdrawal is rejected and no debit is applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("payment sink rejected transfer of {amount} to {destination}: {reason}")]
pub struct TransferError {
    pub destination: AccountId,
    pub amount: Amount,
    pub reason: String,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MarketError.
pub type MarketResult<T> = Result<T, MarketError>;

// =============================================================================
// Unit Tests
// =============================================================================
