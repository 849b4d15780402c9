//! Core data types for draws and the session ledger.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// Opaque record identifier, formatted as a v4 UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint an id from 16 random bytes (version and variant bits are set here).
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Result attached to a record after the real-world draw.
///
/// `amount` only counts when `is_win` is set; a loss always costs the
/// record's wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub is_win: bool,
    pub amount: Money,
}

impl Outcome {
    pub fn win(amount: Money) -> Self {
        Self { is_win: true, amount }
    }

    pub fn loss() -> Self {
        Self {
            is_win: false,
            amount: Money::ZERO,
        }
    }

    /// Signed contribution to the session balance.
    #[inline]
    pub fn net(&self, wager: Money) -> Money {
        if self.is_win {
            self.amount
        } else {
            -wager
        }
    }
}

/// One finalized draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRecord {
    pub id: RecordId,
    /// Distinct, ascending, each in [1, max_number].
    pub numbers: Vec<u32>,
    pub wager: Money,
    pub created_at: DateTime<Utc>,
    pub outcome: Option<Outcome>,
}

impl DrawRecord {
    pub fn new(id: RecordId, numbers: Vec<u32>, wager: Money, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            numbers,
            wager,
            created_at,
            outcome: None,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Signed result, zero while unresolved.
    pub fn net(&self) -> Money {
        self.outcome.map_or(Money::ZERO, |o| o.net(self.wager))
    }

    /// Copy of this record carrying `outcome`. The original is left untouched.
    pub fn with_outcome(&self, outcome: Outcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..self.clone()
        }
    }
}

/// Aggregates folded over the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    /// Records still waiting for an outcome.
    pub pending: usize,
    /// Sum of gains minus lost wagers, resolved records only.
    pub net: Money,
    pub total_wagered: Money,
}
