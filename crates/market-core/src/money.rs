//! # Money Module
//!
//! Provides the `Amount` type for handling monetary values safely.
//!
//! ## Why Unsigned Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer smallest-currency-units                          │
//! │    Prices, payments, and balances are all u64 units                     │
//! │                                                                         │
//! │  WHY UNSIGNED: the ledger forbids negative balances and negative        │
//! │  prices outright, so the type makes the invalid states unrepresentable  │
//! │                                                                         │
//! │  WHY CHECKED: arithmetic never wraps; a credit or debit that would      │
//! │  overflow is surfaced as None and the whole operation is rejected       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::money::Amount;
//!
//! let price = Amount::from_units(1_000_000_000_000);
//!
//! // Arithmetic is checked, never wrapping
//! let total = price.checked_add(Amount::from_units(500)).unwrap();
//! assert_eq!(total.units(), 1_000_000_000_500);
//!
//! // Debiting more than the balance fails cleanly
//! assert!(Amount::zero().checked_sub(price).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Amount Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: negative prices and balances are unrepresentable
/// - **Single field tuple struct**: zero-cost abstraction over u64
/// - **No `Add`/`Sub` operator impls**: every sum or difference in the
///   machine must go through the checked methods, so overflow is a rejected
///   operation instead of a panic or a wrap
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Creates an Amount from smallest-currency-units.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::money::Amount;
    ///
    /// let price = Amount::from_units(1099);
    /// assert_eq!(price.units(), 1099);
    /// ```
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Amount(units)
    }

    /// Returns the value in smallest-currency-units.
    #[inline]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition. Returns `None` on overflow.
    ///
    /// Used when crediting proceeds: a purchase that would push a merchant's
    /// balance past `u64::MAX` is rejected rather than wrapped.
    #[inline]
    pub const fn checked_add(self, other: Amount) -> Option<Amount> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Amount(units)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` if `other` exceeds `self`.
    ///
    /// Used when debiting proceeds: the balance-never-negative invariant
    /// falls out of the type here, not out of a runtime comparison scattered
    /// across call sites.
    #[inline]
    pub const fn checked_sub(self, other: Amount) -> Option<Amount> {
        match self.0.checked_sub(other.0) {
            Some(units) => Some(Amount(units)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw unit count; currency formatting belongs to the
/// embedding environment.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    #[inline]
    fn from(units: u64) -> Self {
        Amount(units)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
