//! Session ledger: every finalized draw, newest first.
//!
//! Append-only, except that a record may receive its outcome once. The
//! outcome is attached by swapping in a new record, never by editing the
//! stored one in place.

use serde::Serialize;

use crate::money::Money;
use crate::types::{DrawRecord, LedgerStats, Outcome, RecordId};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<DrawRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a finalized record at the front of the list.
    pub fn append(&mut self, record: DrawRecord) {
        self.records.insert(0, record);
    }

    /// Attach an outcome to the record with `id`.
    ///
    /// Unknown and already-resolved ids are left alone. Returns whether the
    /// ledger changed.
    pub fn attach_outcome(&mut self, id: &RecordId, is_win: bool, amount: Money) -> bool {
        let Some(pos) = self.records.iter().position(|r| r.id == *id) else {
            log::warn!("Outcome for unknown record {} ignored", id);
            return false;
        };
        if self.records[pos].is_resolved() {
            log::warn!("Record {} already resolved, outcome ignored", id);
            return false;
        }

        let resolved = self.records[pos].with_outcome(Outcome { is_win, amount });
        self.records[pos] = resolved;
        true
    }

    /// Fold the records into session totals.
    pub fn aggregate(&self) -> LedgerStats {
        self.records
            .iter()
            .fold(LedgerStats::default(), |mut stats, record| {
                stats.total += 1;
                stats.total_wagered = stats.total_wagered + record.wager;
                match record.outcome {
                    Some(outcome) => {
                        if outcome.is_win {
                            stats.wins += 1;
                        } else {
                            stats.losses += 1;
                        }
                        stats.net = stats.net + outcome.net(record.wager);
                    }
                    None => stats.pending += 1,
                }
                stats
            })
    }

    pub fn get(&self, id: &RecordId) -> Option<&DrawRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Records newest first.
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &DrawRecord> {
        self.records.iter().filter(|r| !r.is_resolved())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(tag: u8, wager_cents: i64) -> DrawRecord {
        DrawRecord::new(
            RecordId::from_random_bytes([tag; 16]),
            vec![1, 2, 3, 4, 5, 6],
            Money::from_cents(wager_cents),
            Utc::now(),
        )
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut ledger = Ledger::new();
        let a = record(1, 200);
        let b = record(2, 200);
        ledger.append(a.clone());
        ledger.append(b.clone());

        let ids: Vec<RecordId> = ledger.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_attach_unknown_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.append(record(1, 200));
        let before = ledger.records().to_vec();

        let stranger = RecordId::from_random_bytes([99; 16]);
        assert!(!ledger.attach_outcome(&stranger, true, Money::from_cents(500)));
        assert_eq!(ledger.records(), before.as_slice());
    }

    #[test]
    fn test_outcome_set_once() {
        let mut ledger = Ledger::new();
        let r = record(1, 200);
        ledger.append(r.clone());

        assert!(ledger.attach_outcome(&r.id, true, Money::from_cents(1000)));
        assert!(!ledger.attach_outcome(&r.id, false, Money::ZERO));

        let stored = ledger.get(&r.id).unwrap();
        assert_eq!(stored.outcome, Some(Outcome::win(Money::from_cents(1000))));
    }

    #[test]
    fn test_aggregate_net() {
        let mut ledger = Ledger::new();
        let win = record(1, 200);
        let loss = record(2, 300);
        let pending = record(3, 500);
        ledger.append(win.clone());
        ledger.append(loss.clone());
        ledger.append(pending);

        ledger.attach_outcome(&win.id, true, Money::from_cents(1000));
        ledger.attach_outcome(&loss.id, false, Money::ZERO);

        let stats = ledger.aggregate();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.net, Money::from_cents(700));
        assert_eq!(stats.total_wagered, Money::from_cents(1000));
        assert_eq!(ledger.unresolved().count(), 1);
    }

    #[test]
    fn test_loss_costs_wager_not_amount() {
        let mut ledger = Ledger::new();
        let r = record(1, 300);
        ledger.append(r.clone());
        ledger.attach_outcome(&r.id, false, Money::from_cents(4200));
        assert_eq!(ledger.aggregate().net, Money::from_cents(-300));
    }

    #[test]
    fn test_empty_aggregate() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.aggregate(), LedgerStats::default());
    }

    #[test]
    fn test_aggregate_saturates_instead_of_overflowing() {
        let mut ledger = Ledger::new();
        let a = record(1, i64::MAX);
        let b = record(2, i64::MAX);
        ledger.append(a.clone());
        ledger.append(b.clone());
        ledger.attach_outcome(&a.id, true, Money::from_cents(i64::MAX));
        ledger.attach_outcome(&b.id, true, Money::from_cents(i64::MAX));

        let stats = ledger.aggregate();
        assert_eq!(stats.total_wagered, Money::from_cents(i64::MAX));
        assert_eq!(stats.net, Money::from_cents(i64::MAX));
        assert!(!ledger.is_empty());
    }
}
