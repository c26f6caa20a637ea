//! # Domain Types
//!
//! Core domain types used throughout the marketplace ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   AccountId     │   │    Product      │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  UUID v4        │   │  index (u64)    │                             │
//! │  │  opaque key for │   │  name (unique)  │                             │
//! │  │  roles/balances │   │  description    │                             │
//! │  └─────────────────┘   │  merchant       │                             │
//! │                        │  stock          │                             │
//! │                        │  price          │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Amount;

// =============================================================================
// Account Identity
// =============================================================================

/// An opaque account identity.
///
/// Every role lookup and balance lookup in the machine is keyed by one of
/// these. The machine trusts the identity it is handed — authentication is
/// the embedding environment's problem.
///
/// ## Design Decisions
/// - **UUID v4 backed**: globally unique without coordination
/// - **Newtype, not a raw Uuid**: accounts are not interchangeable with
///   other UUID-keyed entities at the type level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generates a fresh random identity.
    #[inline]
    pub fn new() -> Self {
        AccountId(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        AccountId::new()
    }
}

impl From<Uuid> for AccountId {
    #[inline]
    fn from(id: Uuid) -> Self {
        AccountId(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
///
/// Created only by an administrator via [`crate::Market::add_product`];
/// `stock` is mutated only by successful purchases (decremented by 1 per
/// purchase); products are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable ordinal assigned at creation (0-based, insertion order).
    pub index: u64,

    /// Unique name - the catalog's business key.
    pub name: String,

    /// Free-form description; the machine never interprets it.
    pub description: String,

    /// The merchant credited when this product sells. Must be a registered
    /// merchant at creation time.
    pub merchant: AccountId,

    /// Remaining units available for purchase.
    pub stock: u64,

    /// Price per unit in smallest-currency-units. Positive, fixed at
    /// creation.
    pub price: Amount,
}

impl Product {
    /// Checks whether the product can currently be sold.
    #[inline]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_ids_are_distinct() {
        let a = AccountId::new();
        let b = AccountId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_account_id_display_matches_uuid() {
        let id = AccountId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
    }

    #[test]
    fn test_in_stock() {
        let product = Product {
            index: 0,
            name: "widget".to_string(),
            description: "a widget".to_string(),
            merchant: AccountId::new(),
            stock: 1,
            price: Amount::from_units(100),
        };
        assert!(product.in_stock());

        let sold_out = Product { stock: 0, ..product };
        assert!(!sold_out.in_stock());
    }
}
