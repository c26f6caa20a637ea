//! # Events
//!
//! Typed, ordered record of every accepted mutation.
//!
//! The log is purely observational: operation logic never reads it, and
//! appending is the last thing an accepted operation does. External
//! observers read it after the fact; delivery/notification machinery is the
//! embedding environment's concern.

use serde::{Deserialize, Serialize};

use crate::money::Amount;
use crate::types::AccountId;

// =============================================================================
// Market Event
// =============================================================================

/// Payload of one accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarketEvent {
    /// The owner registered a new administrator.
    AdministratorAdded { admin: AccountId },

    /// An administrator (or the owner) registered a new merchant.
    MerchantAdded { merchant: AccountId },

    /// An administrator listed a new product.
    ProductAdded {
        index: u64,
        name: String,
        merchant: AccountId,
    },

    /// A buyer purchased one unit. Carries stock before and after, matching
    /// what observers of the original system were shown.
    ProductPurchased {
        name: String,
        buyer: AccountId,
        initial_stock: u64,
        remaining_stock: u64,
    },

    /// A merchant withdrew accrued proceeds to a destination of their
    /// choice.
    ProceedsWithdrawn {
        merchant: AccountId,
        destination: AccountId,
        amount: Amount,
    },
}

// =============================================================================
// Event Log
// =============================================================================

/// One entry in the log: an event plus its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Monotonically increasing, 0-based position in the log. Sequence
    /// numbers stand in for timestamps so that replay stays deterministic.
    pub sequence: u64,
    pub event: MarketEvent,
}

/// Append-only, ordered event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<SequencedEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Appends `event` with the next sequence number and returns the entry.
    pub fn append(&mut self, event: MarketEvent) -> &SequencedEvent {
        let sequence = self.entries.len() as u64;
        self.entries.push(SequencedEvent { sequence, event });
        // Just pushed
        self.entries.last().expect("log non-empty after push")
    }

    /// Number of recorded events.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&SequencedEvent> {
        self.entries.last()
    }

    /// Iterates entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &SequencedEvent> {
        self.entries.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequence_numbers() {
        let mut log = EventLog::new();
        let admin = AccountId::new();

        let entry = log.append(MarketEvent::AdministratorAdded { admin });
        assert_eq!(entry.sequence, 0);

        let entry = log.append(MarketEvent::MerchantAdded { merchant: admin });
        assert_eq!(entry.sequence, 1);

        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().sequence, 1);
    }

    #[test]
    fn test_iteration_is_oldest_first() {
        let mut log = EventLog::new();
        let a = AccountId::new();
        log.append(MarketEvent::AdministratorAdded { admin: a });
        log.append(MarketEvent::MerchantAdded { merchant: a });

        let kinds: Vec<u64> = log.iter().map(|e| e.sequence).collect();
        assert_eq!(kinds, vec![0, 1]);
    }

    #[test]
    fn test_event_serde_round_trip() {
        let event = MarketEvent::ProductPurchased {
            name: "widget".to_string(),
            buyer: AccountId::new(),
            initial_stock: 1,
            remaining_stock: 0,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"product_purchased\""));
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
