//! # market-core: Pure Business Logic for the Marketplace Ledger
//!
//! This crate is the **whole** of the permissioned marketplace ledger: a
//! single authoritative state machine tracking roles, a product catalog,
//! inventory, and per-merchant pending proceeds.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Marketplace Ledger Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Host Environment (external collaborators)               │   │
//! │  │   transport • caller authentication • persistence • metering    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ caller identity + operation            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   roles   │  │  catalog  │  │  ledger   │  │  events   │  │   │
//! │  │   │ Registry  │  │  Products │  │ Proceeds  │  │    Log    │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  │   │
//! │  │         └──────────────┴───────┬──────┴───────────────┘        │   │
//! │  │                        ┌───────▼────────┐                      │   │
//! │  │                        │ Market machine │                      │   │
//! │  │                        └────────────────┘                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • ALL-OR-NOTHING OPERATIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PaymentSink (injected)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Value transfer (host-provided effect)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`market`] - The [`Market`] state machine; every operation lives here
//! - [`roles`] - Owner/administrator/merchant registry and capability checks
//! - [`catalog`] - Name-indexed products with stable insertion ordinals
//! - [`ledger`] - Per-merchant accrued proceeds
//! - [`events`] - Typed, ordered log of accepted mutations
//! - [`payment`] - The injected value-transfer collaborator
//! - [`ops`] - Serializable operations and deterministic replay
//! - [`money`] - `Amount`: unsigned integer money with checked arithmetic
//! - [`types`] - `AccountId`, `Product`
//! - [`error`] - Typed domain and validation errors
//! - [`validation`] - Argument validation, run before any business logic
//!
//! ## Design Principles
//!
//! 1. **All-or-nothing**: every operation either fully applies or returns a
//!    [`MarketError`] with zero side effects
//! 2. **Checks before mutation**: authorization and validation never touch
//!    state; mutation starts only after every check has passed
//! 3. **No I/O**: the single external effect (withdrawal transfer) enters
//!    through the [`payment::PaymentSink`] trait
//! 4. **Deterministic**: replaying the same accepted-operation sequence from
//!    empty state always yields identical state
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::{AccountId, Amount, Market};
//! use market_core::payment::CollectingSink;
//!
//! let owner = AccountId::new();
//! let admin = AccountId::new();
//! let merchant = AccountId::new();
//! let buyer = AccountId::new();
//!
//! let mut market = Market::new(owner, true);
//! market.add_administrator(owner, admin).unwrap();
//! market.add_merchant(admin, merchant).unwrap();
//!
//! let price = Amount::from_units(1099);
//! market.add_product(admin, "widget", "a fine widget", merchant, 3, price).unwrap();
//!
//! // Anyone can buy, for exactly the listed price
//! market.buy_product(buyer, "widget", price).unwrap();
//! assert_eq!(market.proceeds_of(merchant), price);
//!
//! // Merchants withdraw through an injected payment sink
//! let mut sink = CollectingSink::new();
//! market.withdraw_proceeds(merchant, merchant, price, &mut sink).unwrap();
//! assert_eq!(sink.delivered_to(merchant), price);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod events;
pub mod ledger;
pub mod market;
pub mod money;
pub mod ops;
pub mod payment;
pub mod roles;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use market_core::Market` instead of
// `use market_core::market::Market`

pub use error::{MarketError, MarketResult, TransferError, ValidationError};
pub use events::{EventLog, MarketEvent, SequencedEvent};
pub use market::Market;
pub use money::Amount;
pub use ops::Operation;
pub use payment::PaymentSink;
pub use types::{AccountId, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in bytes.
///
/// ## Business Reason
/// The name is the catalog's lookup key; an unbounded key invites abuse by
/// callers the machine explicitly treats as adversarial.
pub const MAX_NAME_LEN: usize = 200;
