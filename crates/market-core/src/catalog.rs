//! # Product Catalog
//!
//! Name-indexed product records with stable insertion ordinals.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Storage                                     │
//! │                                                                         │
//! │  products: Vec<Product>        by_name: BTreeMap<String, usize>         │
//! │  ┌───────────────────┐         ┌──────────────────────┐                │
//! │  │ [0] widget        │◄────────│ "widget"   → 0       │                │
//! │  │ [1] sprocket      │◄────────│ "sprocket" → 1       │                │
//! │  └───────────────────┘         └──────────────────────┘                │
//! │                                                                         │
//! │  The Vec position IS the product's public index: products are never    │
//! │  deleted, so ordinals are stable for the lifetime of the machine       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::money::Amount;
use crate::types::{AccountId, Product};
use crate::validation::ValidationResult;

/// Insertion-ordered product store with exact-name lookup.
///
/// Duplicate names are rejected at insert; lookup is exact-match only
/// (catalog search is a non-goal).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    // Ordered map so the serialized form of the machine is deterministic
    by_name: BTreeMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Number of products ever added (products are never removed).
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when no products have been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The ordinal the next inserted product will receive.
    #[inline]
    pub fn next_index(&self) -> u64 {
        self.products.len() as u64
    }

    /// Pure lookup by exact name.
    pub fn get_by_name(&self, name: &str) -> Option<&Product> {
        self.by_name.get(name).map(|&slot| &self.products[slot])
    }

    /// Checks the duplicate-name rule without inserting.
    ///
    /// Split out from [`Self::insert`] so the machine can run ALL checks
    /// before it mutates anything.
    pub fn check_name_available(&self, name: &str) -> ValidationResult<()> {
        if self.by_name.contains_key(name) {
            return Err(ValidationError::Duplicate {
                field: "name",
                value: name.to_string(),
            });
        }
        Ok(())
    }

    /// Stores a record under the next sequential index and returns that
    /// index.
    ///
    /// Callers must have verified [`Self::check_name_available`] first; the
    /// debug assertion documents the contract.
    pub fn insert(
        &mut self,
        name: String,
        description: String,
        merchant: AccountId,
        stock: u64,
        price: Amount,
    ) -> u64 {
        debug_assert!(!self.by_name.contains_key(&name));

        let index = self.next_index();
        self.by_name.insert(name.clone(), self.products.len());
        self.products.push(Product {
            index,
            name,
            description,
            merchant,
            stock,
            price,
        });
        index
    }

    /// Decrements the stock of `name` by one and returns (before, after).
    ///
    /// The caller (the purchase path) has already verified the product
    /// exists and is in stock; both are debug-asserted here.
    pub fn decrement_stock(&mut self, name: &str) -> (u64, u64) {
        let slot = self.by_name[name];
        let product = &mut self.products[slot];
        debug_assert!(product.stock > 0);

        let before = product.stock;
        product.stock -= 1;
        (before, product.stock)
    }

    /// Iterates products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
