//! Weighted authorization ledger.
//!
//! Maps principals to influence weights and maintains a running total plus a
//! threshold. The `meets_threshold` predicate is the single authorization
//! primitive the treasury gate consumes; the proposal engine reads the same
//! ledger shape for its voter roll.

use std::collections::HashMap;
use agora_types::Principal;

/// Principal -> weight map with incrementally maintained aggregate.
///
/// Invariant: `total_weight` equals the sum of all entries' weights after
/// every mutation. Updates adjust the total by the delta against the prior
/// weight, never by blind re-addition.
#[derive(Debug, Default, Clone)]
pub struct WeightLedger {
    entries: HashMap<Principal, u64>,
    total_weight: u64,
    threshold: u64,
}

impl WeightLedger {
    /// Create an empty ledger with threshold 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a principal's weight.
    ///
    /// Re-adding an existing principal overwrites the stored weight and moves
    /// the total by the delta.
    pub fn set_weight(&mut self, principal: Principal, weight: u64) {
        let previous = self.entries.insert(principal, weight).unwrap_or(0);
        self.total_weight = self.total_weight.saturating_sub(previous).saturating_add(weight);
        tracing::debug!(
            "Weight for {} set to {} (total {})",
            principal,
            weight,
            self.total_weight
        );
    }

    /// Remove a principal's entry, subtracting its weight from the total.
    ///
    /// Removing an absent principal is a no-op (weight defaults to 0).
    /// Returns the weight that was removed.
    pub fn remove(&mut self, principal: &Principal) -> u64 {
        let removed = self.entries.remove(principal).unwrap_or(0);
        self.total_weight = self.total_weight.saturating_sub(removed);
        removed
    }

    /// Replace the authorization threshold.
    pub fn set_threshold(&mut self, value: u64) {
        self.threshold = value;
    }

    /// Weight of a principal; 0 if absent.
    pub fn weight_of(&self, principal: &Principal) -> u64 {
        self.entries.get(principal).copied().unwrap_or(0)
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Whether a principal's weight meets or exceeds the threshold.
    pub fn meets_threshold(&self, principal: &Principal) -> bool {
        self.weight_of(principal) >= self.threshold
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(byte: u8) -> Principal {
        Principal::from_bytes([byte; 20])
    }

    #[test]
    fn test_set_and_read_weight() {
        let mut ledger = WeightLedger::new();
        ledger.set_weight(p(1), 50);

        assert_eq!(ledger.weight_of(&p(1)), 50);
        assert_eq!(ledger.total_weight(), 50);

        // Absent principal reads as 0
        assert_eq!(ledger.weight_of(&p(9)), 0);
    }

    #[test]
    fn test_update_adjusts_total_by_delta() {
        let mut ledger = WeightLedger::new();
        ledger.set_weight(p(1), 50);
        ledger.set_weight(p(2), 30);
        assert_eq!(ledger.total_weight(), 80);

        // Overwrite, not re-add: total moves by the delta
        ledger.set_weight(p(1), 20);
        assert_eq!(ledger.weight_of(&p(1)), 20);
        assert_eq!(ledger.total_weight(), 50);

        ledger.set_weight(p(1), 70);
        assert_eq!(ledger.total_weight(), 100);
    }

    #[test]
    fn test_remove() {
        let mut ledger = WeightLedger::new();
        ledger.set_weight(p(1), 50);
        ledger.set_weight(p(2), 30);

        assert_eq!(ledger.remove(&p(1)), 50);
        assert_eq!(ledger.total_weight(), 30);
        assert_eq!(ledger.weight_of(&p(1)), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut ledger = WeightLedger::new();
        ledger.set_weight(p(1), 50);

        assert_eq!(ledger.remove(&p(9)), 0);
        assert_eq!(ledger.total_weight(), 50);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_total_matches_entry_sum_over_sequence() {
        let mut ledger = WeightLedger::new();

        // Mixed add/update/remove sequence
        ledger.set_weight(p(1), 10);
        ledger.set_weight(p(2), 20);
        ledger.set_weight(p(3), 30);
        ledger.set_weight(p(2), 5);
        ledger.remove(&p(1));
        ledger.set_weight(p(4), 0);
        ledger.remove(&p(9));

        let sum: u64 = [p(2), p(3), p(4)].iter().map(|q| ledger.weight_of(q)).sum();
        assert_eq!(ledger.total_weight(), sum);
        assert_eq!(ledger.total_weight(), 35);
    }

    #[test]
    fn test_meets_threshold() {
        let mut ledger = WeightLedger::new();
        ledger.set_weight(p(1), 50);
        ledger.set_threshold(75);

        assert!(!ledger.meets_threshold(&p(1)));

        ledger.set_weight(p(1), 75);
        assert!(ledger.meets_threshold(&p(1)));

        ledger.set_weight(p(1), 80);
        assert!(ledger.meets_threshold(&p(1)));
    }

    #[test]
    fn test_zero_threshold_admits_everyone() {
        let mut ledger = WeightLedger::new();
        assert_eq!(ledger.threshold(), 0);

        // Even an absent principal (weight 0) meets a 0 threshold
        assert!(ledger.meets_threshold(&p(9)));

        ledger.set_weight(p(1), 1);
        assert!(ledger.meets_threshold(&p(1)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum LedgerOp {
            Set(u8, u64),
            Remove(u8),
        }

        fn ledger_op() -> impl Strategy<Value = LedgerOp> {
            prop_oneof![
                (any::<u8>(), 0..=u16::MAX as u64).prop_map(|(who, w)| LedgerOp::Set(who, w)),
                any::<u8>().prop_map(LedgerOp::Remove),
            ]
        }

        proptest! {
            #[test]
            fn total_weight_equals_entry_sum(ops in proptest::collection::vec(ledger_op(), 0..64)) {
                let mut ledger = WeightLedger::new();
                let mut model: HashMap<u8, u64> = HashMap::new();

                for op in ops {
                    match op {
                        LedgerOp::Set(who, w) => {
                            ledger.set_weight(p(who), w);
                            model.insert(who, w);
                        }
                        LedgerOp::Remove(who) => {
                            ledger.remove(&p(who));
                            model.remove(&who);
                        }
                    }
                }

                prop_assert_eq!(ledger.total_weight(), model.values().sum::<u64>());
                prop_assert_eq!(ledger.len(), model.len());
                for (who, w) in &model {
                    prop_assert_eq!(ledger.weight_of(&p(*who)), *w);
                }
            }
        }
    }
}
