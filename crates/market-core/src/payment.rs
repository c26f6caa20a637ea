//! # Payment Sink
//!
//! The one external effect in the machine: delivering withdrawn proceeds to
//! a destination account.
//!
//! ## Transfer-Then-Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Withdrawal Atomicity                                 │
//! │                                                                         │
//! │  withdraw_proceeds(caller, destination, amount)                        │
//! │       │                                                                 │
//! │       ├── 1. role + amount + balance checks     (no mutation)          │
//! │       │                                                                 │
//! │       ├── 2. sink.transfer(destination, amount) (external effect)      │
//! │       │        │                                                        │
//! │       │        ├── Err → whole operation rejected, NO debit applied    │
//! │       │        │                                                        │
//! │       │        └── Ok ▼                                                 │
//! │       └── 3. ledger debit + event append        (commit)               │
//! │                                                                         │
//! │  There is no state in which funds are debited but not delivered        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait is object-safe; the machine takes `&mut dyn PaymentSink` so
//! hosts can inject whatever actually moves value in their environment.

use serde::{Deserialize, Serialize};

use crate::error::TransferError;
use crate::money::Amount;
use crate::types::AccountId;

// =============================================================================
// Payment Sink Trait
// =============================================================================

/// External collaborator that delivers value during a withdrawal.
///
/// Implementations must be all-or-nothing themselves: returning `Ok(())`
/// asserts the value is delivered, and the machine commits the ledger debit
/// on the strength of that assertion.
pub trait PaymentSink {
    /// Transfers `amount` to `destination`.
    fn transfer(&mut self, destination: AccountId, amount: Amount) -> Result<(), TransferError>;
}

// =============================================================================
// Collecting Sink
// =============================================================================

/// In-memory sink that records every transfer it is asked to perform.
///
/// Used by tests and by replay; doubles as the reference implementation of
/// the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectingSink {
    transfers: Vec<(AccountId, Amount)>,
}

impl CollectingSink {
    /// Creates a sink with no recorded transfers.
    pub fn new() -> Self {
        CollectingSink::default()
    }

    /// Every transfer performed, oldest first.
    pub fn transfers(&self) -> &[(AccountId, Amount)] {
        &self.transfers
    }

    /// Total value delivered to `destination`.
    pub fn delivered_to(&self, destination: AccountId) -> Amount {
        self.transfers
            .iter()
            .filter(|(to, _)| *to == destination)
            .fold(Amount::zero(), |sum, &(_, amount)| {
                sum.checked_add(amount).unwrap_or(Amount::from_units(u64::MAX))
            })
    }
}

impl PaymentSink for CollectingSink {
    fn transfer(&mut self, destination: AccountId, amount: Amount) -> Result<(), TransferError> {
        self.transfers.push((destination, amount));
        Ok(())
    }
}

// =============================================================================
// Failing Sink
// =============================================================================

/// Sink that refuses every transfer. Exists so hosts and tests can exercise
/// the no-debit-on-transfer-failure guarantee.
#[derive(Debug, Clone, Default)]
pub struct FailingSink;

impl PaymentSink for FailingSink {
    fn transfer(&mut self, destination: AccountId, amount: Amount) -> Result<(), TransferError> {
        Err(TransferError {
            destination,
            amount,
            reason: "sink unavailable".to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
