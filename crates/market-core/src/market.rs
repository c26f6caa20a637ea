//! # Market State Machine
//!
//! The single authoritative state machine: roles, catalog, inventory, and
//! per-merchant proceeds, mutated only through the operations on [`Market`].
//!
//! ## Operation Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Every Mutating Operation Runs In This Order                │
//! │                                                                         │
//! │  1. Service gate      enabled flag set at construction                 │
//! │  2. Capability        RoleRegistry::authorize, one declared role       │
//! │  3. Validation        argument shape, then domain state                 │
//! │  4. Mutation          state change + event append + tracing            │
//! │                                                                         │
//! │  Steps 1-3 never touch state. A failure at any step returns a          │
//! │  MarketError and leaves roles, catalog, balances, and the event log    │
//! │  byte-for-byte unchanged. This all-or-nothing contract is the          │
//! │  central invariant of the whole crate.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! The machine is logically single-threaded: operations take `&mut self`,
//! so the borrow checker serializes them. Hosts that share a machine across
//! threads wrap it in one lock around whole operations; there is no
//! per-field locking to get wrong.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{MarketError, MarketResult};
use crate::events::{EventLog, MarketEvent, SequencedEvent};
use crate::ledger::ProceedsLedger;
use crate::money::Amount;
use crate::payment::PaymentSink;
use crate::roles::{Capability, RoleRegistry};
use crate::types::{AccountId, Product};
use crate::validation;

// =============================================================================
// Market
// =============================================================================

/// The permissioned marketplace ledger.
///
/// Owns all state exclusively; operations either fully apply or fully
/// reject. Construct one with [`Market::new`] and drive it through the
/// operation methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Global switch fixed at construction. When false, every mutating
    /// operation is rejected with [`MarketError::ServiceDisabled`].
    enabled: bool,
    roles: RoleRegistry,
    catalog: Catalog,
    ledger: ProceedsLedger,
    events: EventLog,
}

impl Market {
    /// Constructs a machine owned by `owner` with the service flag set to
    /// `enabled`. Both are fixed for the machine's lifetime.
    pub fn new(owner: AccountId, enabled: bool) -> Self {
        info!(owner = %owner, enabled, "Market constructed");
        Market {
            enabled,
            roles: RoleRegistry::new(owner),
            catalog: Catalog::new(),
            ledger: ProceedsLedger::new(),
            events: EventLog::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Pure reads (never gated, never mutate)
    // -------------------------------------------------------------------------

    /// The service flag set at construction.
    #[inline]
    pub const fn is_service_enabled(&self) -> bool {
        self.enabled
    }

    /// The owner identity fixed at construction.
    #[inline]
    pub const fn owner(&self) -> AccountId {
        self.roles.owner()
    }

    /// Is `id` a registered administrator?
    #[inline]
    pub fn is_administrator(&self, id: AccountId) -> bool {
        self.roles.is_administrator(id)
    }

    /// Is `id` a registered merchant?
    #[inline]
    pub fn is_merchant(&self, id: AccountId) -> bool {
        self.roles.is_merchant(id)
    }

    /// Exact-name catalog lookup.
    pub fn get_product_by_name(&self, name: &str) -> Option<&Product> {
        self.catalog.get_by_name(name)
    }

    /// Accrued, not-yet-withdrawn proceeds of `merchant`. Unknown
    /// identities read as zero.
    pub fn proceeds_of(&self, merchant: AccountId) -> Amount {
        self.ledger.balance_of(merchant)
    }

    /// The ordered log of every accepted mutation.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The catalog, for read-only inspection.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // -------------------------------------------------------------------------
    // Role operations
    // -------------------------------------------------------------------------

    /// Registers `target` as an administrator. Owner only.
    ///
    /// Re-adding an existing administrator is accepted (set union) and
    /// still emits its event.
    pub fn add_administrator(
        &mut self,
        caller: AccountId,
        target: AccountId,
    ) -> MarketResult<SequencedEvent> {
        self.check_enabled()?;
        self.roles.authorize(caller, Capability::Owner).map_err(reject)?;

        self.roles.insert_administrator(target);
        info!(admin = %target, "Administrator added");
        Ok(self
            .events
            .append(MarketEvent::AdministratorAdded { admin: target })
            .clone())
    }

    /// Registers `target` as a merchant. Owner or administrator.
    pub fn add_merchant(
        &mut self,
        caller: AccountId,
        target: AccountId,
    ) -> MarketResult<SequencedEvent> {
        self.check_enabled()?;
        self.roles
            .authorize(caller, Capability::Administrator)
            .map_err(reject)?;

        self.roles.insert_merchant(target);
        info!(merchant = %target, "Merchant added");
        Ok(self
            .events
            .append(MarketEvent::MerchantAdded { merchant: target })
            .clone())
    }

    // -------------------------------------------------------------------------
    // Catalog operations
    // -------------------------------------------------------------------------

    /// Lists a new product and returns its index. Owner or administrator.
    ///
    /// ## Checks, in order
    /// 1. service gate
    /// 2. caller holds Administrator
    /// 3. name well-formed and not already listed
    /// 4. price positive
    /// 5. `merchant` is a registered merchant
    ///
    /// Any stock count (including zero) is accepted; stock only ever
    /// decreases, so a zero-stock listing is permanently unsellable but
    /// still a valid record.
    pub fn add_product(
        &mut self,
        caller: AccountId,
        name: &str,
        description: &str,
        merchant: AccountId,
        stock: u64,
        price: Amount,
    ) -> MarketResult<u64> {
        self.check_enabled()?;
        self.roles
            .authorize(caller, Capability::Administrator)
            .map_err(reject)?;
        validation::validate_product_name(name).map_err(|e| reject(e.into()))?;
        self.catalog.check_name_available(name).map_err(|e| reject(e.into()))?;
        validation::validate_price(price).map_err(|e| reject(e.into()))?;

        if !self.roles.is_merchant(merchant) {
            return Err(reject(MarketError::InvalidMerchant { merchant }));
        }

        let index = self
            .catalog
            .insert(name.to_string(), description.to_string(), merchant, stock, price);
        info!(index, name, merchant = %merchant, stock, price = %price, "Product added");
        self.events.append(MarketEvent::ProductAdded {
            index,
            name: name.to_string(),
            merchant,
        });
        Ok(index)
    }

    // -------------------------------------------------------------------------
    // Purchase
    // -------------------------------------------------------------------------

    /// Purchases one unit of `name` for exactly its price. Open to anyone.
    ///
    /// ## Checks, in order
    /// 1. service gate
    /// 2. product exists          → `NotFound`
    /// 3. stock > 0               → `OutOfStock`
    /// 4. payment == price        → `InsufficientPayment` (both directions:
    ///    the machine makes no change and keeps no excess)
    /// 5. merchant balance credit would not overflow
    ///
    /// On success: stock -1, merchant proceeds +price, event appended.
    pub fn buy_product(
        &mut self,
        caller: AccountId,
        name: &str,
        payment: Amount,
    ) -> MarketResult<SequencedEvent> {
        self.check_enabled()?;

        let (merchant, price) = match self.catalog.get_by_name(name) {
            None => {
                return Err(reject(MarketError::NotFound {
                    name: name.to_string(),
                }))
            }
            Some(product) => {
                if !product.in_stock() {
                    return Err(reject(MarketError::OutOfStock {
                        name: name.to_string(),
                    }));
                }
                (product.merchant, product.price)
            }
        };

        if payment != price {
            return Err(reject(MarketError::InsufficientPayment {
                required: price,
                offered: payment,
            }));
        }

        self.ledger
            .check_credit(merchant, price)
            .map_err(|e| reject(e.into()))?;

        // All checks passed; the three mutations below cannot fail.
        let (initial_stock, remaining_stock) = self.catalog.decrement_stock(name);
        self.ledger.credit(merchant, price);
        info!(name, buyer = %caller, initial_stock, remaining_stock, "Product purchased");
        Ok(self
            .events
            .append(MarketEvent::ProductPurchased {
                name: name.to_string(),
                buyer: caller,
                initial_stock,
                remaining_stock,
            })
            .clone())
    }

    // -------------------------------------------------------------------------
    // Withdrawal
    // -------------------------------------------------------------------------

    /// Withdraws `amount` of the caller's accrued proceeds to `destination`
    /// through the injected `sink`. Merchants only, and only their own
    /// balance.
    ///
    /// ## Atomicity
    /// The external transfer and the ledger debit are one unit: the sink is
    /// invoked after every precondition passes, and the debit is applied
    /// only once the sink reports success. A sink failure surfaces as
    /// [`MarketError::TransferFailed`] with zero state change.
    pub fn withdraw_proceeds(
        &mut self,
        caller: AccountId,
        destination: AccountId,
        amount: Amount,
        sink: &mut dyn PaymentSink,
    ) -> MarketResult<SequencedEvent> {
        self.check_enabled()?;
        self.roles.authorize(caller, Capability::Merchant).map_err(reject)?;
        validation::validate_withdrawal_amount(amount).map_err(|e| reject(e.into()))?;

        let available = self.ledger.balance_of(caller);
        if amount > available {
            return Err(reject(MarketError::InsufficientBalance {
                available,
                requested: amount,
            }));
        }

        // Transfer-then-commit: no state in which funds are debited but not
        // delivered.
        sink.transfer(destination, amount).map_err(|e| {
            warn!(merchant = %caller, amount = %amount, error = %e, "Withdrawal transfer failed");
            MarketError::TransferFailed(e)
        })?;

        let remaining = self
            .ledger
            .debit(caller, amount)
            .expect("balance checked before transfer");
        info!(merchant = %caller, destination = %destination, amount = %amount, remaining = %remaining, "Proceeds withdrawn");
        Ok(self
            .events
            .append(MarketEvent::ProceedsWithdrawn {
                merchant: caller,
                destination,
                amount,
            })
            .clone())
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    /// The service gate: first check of every mutating operation.
    fn check_enabled(&self) -> MarketResult<()> {
        if self.enabled {
            Ok(())
        } else {
            debug!("Operation rejected: service disabled");
            Err(MarketError::ServiceDisabled)
        }
    }
}

/// Traces a rejection on its way out. Keeps the operation bodies free of
/// per-error logging noise.
fn reject(err: MarketError) -> MarketError {
    debug!(error = %err, "Operation rejected");
    err
}

// =============================================================================
// Unit Tests
// =============================================================================
