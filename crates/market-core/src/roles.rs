//! # Role Registry
//!
//! Owner, administrator set, and merchant set; gates every privileged
//! operation on the machine.
//!
//! ## Capability Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Who May Do What                                    │
//! │                                                                         │
//! │  Capability::Owner          add_administrator                          │
//! │  Capability::Administrator  add_merchant, add_product                  │
//! │                             (owner implicitly qualifies)               │
//! │  Capability::Merchant       withdraw_proceeds                          │
//! │                                                                         │
//! │  Each operation declares ONE required capability; the machine calls    │
//! │  authorize() uniformly instead of scattering role checks per-call      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Membership is monotonic: there is no removal operation, and re-adding an
//! existing member is an accepted no-op (set union).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{MarketError, MarketResult};
use crate::types::AccountId;

// =============================================================================
// Capability
// =============================================================================

/// The role a mutating operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Only the fixed owner identity qualifies.
    Owner,
    /// The owner or any registered administrator qualifies.
    Administrator,
    /// Any registered merchant qualifies. The owner does NOT implicitly
    /// qualify; proceeds belong to merchants.
    Merchant,
}

impl Capability {
    /// Human-readable name, used in `Unauthorized` error context.
    pub const fn name(&self) -> &'static str {
        match self {
            Capability::Owner => "owner",
            Capability::Administrator => "administrator",
            Capability::Merchant => "merchant",
        }
    }
}

// =============================================================================
// Role Registry
// =============================================================================

/// The machine's role state: one fixed owner plus add-only administrator and
/// merchant sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    owner: AccountId,
    // Ordered sets so the serialized form of the machine is deterministic
    administrators: BTreeSet<AccountId>,
    merchants: BTreeSet<AccountId>,
}

impl RoleRegistry {
    /// Creates a registry with the given owner and empty role sets.
    pub fn new(owner: AccountId) -> Self {
        RoleRegistry {
            owner,
            administrators: BTreeSet::new(),
            merchants: BTreeSet::new(),
        }
    }

    /// The owner identity fixed at construction.
    #[inline]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Pure lookup: is `id` a registered administrator?
    ///
    /// Note this is strict set membership; the owner is only *implicitly*
    /// privileged for administrator-gated actions (see [`Self::authorize`])
    /// and does not appear in the set unless explicitly added.
    #[inline]
    pub fn is_administrator(&self, id: AccountId) -> bool {
        self.administrators.contains(&id)
    }

    /// Pure lookup: is `id` a registered merchant?
    #[inline]
    pub fn is_merchant(&self, id: AccountId) -> bool {
        self.merchants.contains(&id)
    }

    /// Checks that `caller` holds `required`, without mutating anything.
    ///
    /// This is the single choke point for every privileged operation.
    pub fn authorize(&self, caller: AccountId, required: Capability) -> MarketResult<()> {
        let authorized = match required {
            Capability::Owner => caller == self.owner,
            Capability::Administrator => caller == self.owner || self.is_administrator(caller),
            Capability::Merchant => self.is_merchant(caller),
        };

        if authorized {
            Ok(())
        } else {
            Err(MarketError::Unauthorized {
                caller,
                required: required.name(),
            })
        }
    }

    /// Adds `target` to the administrator set. Idempotent.
    ///
    /// Authorization is the machine's job; this method only records
    /// membership.
    pub fn insert_administrator(&mut self, target: AccountId) {
        self.administrators.insert(target);
    }

    /// Adds `target` to the merchant set. Idempotent.
    pub fn insert_merchant(&mut self, target: AccountId) {
        self.merchants.insert(target);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
