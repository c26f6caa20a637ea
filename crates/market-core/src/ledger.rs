//! # Proceeds Ledger
//!
//! Per-merchant accrued balances: credited by successful purchases of the
//! merchant's products, debited by successful withdrawals.
//!
//! Balances can never go negative; the checked arithmetic on
//! [`Amount`](crate::money::Amount) enforces the invariant structurally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::money::Amount;
use crate::types::AccountId;
use crate::validation::ValidationResult;

/// Mapping from merchant identity to accrued, not-yet-withdrawn proceeds.
///
/// Identities with no entry read as zero; an entry is only materialized by
/// the first credit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceedsLedger {
    // Ordered map so the serialized form of the machine is deterministic
    balances: BTreeMap<AccountId, Amount>,
}

impl ProceedsLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        ProceedsLedger::default()
    }

    /// Pure lookup; missing entries read as zero.
    pub fn balance_of(&self, merchant: AccountId) -> Amount {
        self.balances.get(&merchant).copied().unwrap_or_default()
    }

    /// Sum of every balance. Used by conservation checks in tests; the
    /// machine itself never needs the total.
    pub fn total(&self) -> Amount {
        self.balances
            .values()
            .fold(Amount::zero(), |sum, &balance| {
                sum.checked_add(balance).unwrap_or(Amount::from_units(u64::MAX))
            })
    }

    /// Checks that crediting would not overflow, without mutating.
    pub fn check_credit(&self, merchant: AccountId, amount: Amount) -> ValidationResult<Amount> {
        self.balance_of(merchant)
            .checked_add(amount)
            .ok_or(ValidationError::Overflow { field: "balance" })
    }

    /// Credits `amount` to `merchant`.
    ///
    /// Callers run [`Self::check_credit`] first; the purchase path must not
    /// discover overflow after it has already decremented stock.
    pub fn credit(&mut self, merchant: AccountId, amount: Amount) {
        let next = self
            .balance_of(merchant)
            .checked_add(amount)
            .expect("credit checked before apply");
        self.balances.insert(merchant, next);
    }

    /// Debits `amount` from `merchant`. Returns the remaining balance, or
    /// `None` when the balance is insufficient (nothing is changed in that
    /// case).
    pub fn debit(&mut self, merchant: AccountId, amount: Amount) -> Option<Amount> {
        let next = self.balance_of(merchant).checked_sub(amount)?;
        self.balances.insert(merchant, next);
        Some(next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_reads_as_zero() {
        let ledger = ProceedsLedger::new();
        assert_eq!(ledger.balance_of(AccountId::new()), Amount::zero());
    }

    #[test]
    fn test_credit_accumulates() {
        let mut ledger = ProceedsLedger::new();
        let merchant = AccountId::new();

        ledger.credit(merchant, Amount::from_units(100));
        ledger.credit(merchant, Amount::from_units(250));
        assert_eq!(ledger.balance_of(merchant), Amount::from_units(350));
    }

    #[test]
    fn test_debit_within_balance() {
        let mut ledger = ProceedsLedger::new();
        let merchant = AccountId::new();
        ledger.credit(merchant, Amount::from_units(100));

        assert_eq!(
            ledger.debit(merchant, Amount::from_units(40)),
            Some(Amount::from_units(60))
        );
        assert_eq!(ledger.balance_of(merchant), Amount::from_units(60));
    }

    #[test]
    fn test_debit_beyond_balance_changes_nothing() {
        let mut ledger = ProceedsLedger::new();
        let merchant = AccountId::new();
        ledger.credit(merchant, Amount::from_units(100));

        assert_eq!(ledger.debit(merchant, Amount::from_units(101)), None);
        assert_eq!(ledger.balance_of(merchant), Amount::from_units(100));

        // Zero-balance case: debit from an identity never credited
        assert_eq!(ledger.debit(AccountId::new(), Amount::from_units(1)), None);
    }

    #[test]
    fn test_check_credit_detects_overflow() {
        let mut ledger = ProceedsLedger::new();
        let merchant = AccountId::new();
        ledger.credit(merchant, Amount::from_units(u64::MAX));

        assert!(ledger.check_credit(merchant, Amount::from_units(1)).is_err());
        assert!(ledger
            .check_credit(AccountId::new(), Amount::from_units(1))
            .is_ok());
    }

    #[test]
    fn test_total() {
        let mut ledger = ProceedsLedger::new();
        ledger.credit(AccountId::new(), Amount::from_units(100));
        ledger.credit(AccountId::new(), Amount::from_units(23));
        assert_eq!(ledger.total(), Amount::from_units(123));
    }
}
