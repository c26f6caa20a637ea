//! # Operation Log & Replay
//!
//! Serializable descriptions of every mutating operation, and replay of a
//! recorded sequence against an empty machine.
//!
//! ## Why Replay Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Deterministic Recovery                               │
//! │                                                                         │
//! │  The machine's full state is recoverable from:                         │
//! │                                                                         │
//! │    (owner, enabled)  +  the sequence of ACCEPTED operations            │
//! │                                                                         │
//! │  replay() applies the sequence in order from empty state; applying     │
//! │  the same sequence twice yields identical state. Hosts that persist    │
//! │  the operation log get durability without this crate doing any I/O.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected operations during replay are reported, not fatal: the machine's
//! contract is that a rejection mutates nothing, so replaying a log that
//! contains rejections still converges on the same state.

use serde::{Deserialize, Serialize};

use crate::error::MarketError;
use crate::market::Market;
use crate::money::Amount;
use crate::payment::PaymentSink;
use crate::types::AccountId;

// =============================================================================
// Operation
// =============================================================================

/// One mutating operation with its caller, in wire-friendly form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    AddAdministrator {
        caller: AccountId,
        target: AccountId,
    },
    AddMerchant {
        caller: AccountId,
        target: AccountId,
    },
    AddProduct {
        caller: AccountId,
        name: String,
        description: String,
        merchant: AccountId,
        stock: u64,
        price: Amount,
    },
    BuyProduct {
        caller: AccountId,
        name: String,
        payment: Amount,
    },
    WithdrawProceeds {
        caller: AccountId,
        destination: AccountId,
        amount: Amount,
    },
}

impl Operation {
    /// Applies this operation to `market`, routing withdrawal transfers
    /// through `sink`. Success results are flattened to `()`; the caller
    /// can read emitted events off the machine's log.
    pub fn apply(
        &self,
        market: &mut Market,
        sink: &mut dyn PaymentSink,
    ) -> Result<(), MarketError> {
        match self {
            Operation::AddAdministrator { caller, target } => {
                market.add_administrator(*caller, *target).map(drop)
            }
            Operation::AddMerchant { caller, target } => {
                market.add_merchant(*caller, *target).map(drop)
            }
            Operation::AddProduct {
                caller,
                name,
                description,
                merchant,
                stock,
                price,
            } => market
                .add_product(*caller, name, description, *merchant, *stock, *price)
                .map(drop),
            Operation::BuyProduct {
                caller,
                name,
                payment,
            } => market.buy_product(*caller, name, *payment).map(drop),
            Operation::WithdrawProceeds {
                caller,
                destination,
                amount,
            } => market
                .withdraw_proceeds(*caller, *destination, *amount, sink)
                .map(drop),
        }
    }
}

// =============================================================================
// Replay
// =============================================================================

/// Constructs an empty machine and applies `operations` in order.
///
/// Returns the final machine plus the per-operation outcomes, in the same
/// order as the input. Transfers performed by withdrawals go to `sink`.
pub fn replay(
    owner: AccountId,
    enabled: bool,
    operations: &[Operation],
    sink: &mut dyn PaymentSink,
) -> (Market, Vec<Result<(), MarketError>>) {
    let mut market = Market::new(owner, enabled);
    let outcomes = operations
        .iter()
        .map(|op| op.apply(&mut market, sink))
        .collect();
    (market, outcomes)
}

// =============================================================================
// Unit Tests
// =============================================================================
