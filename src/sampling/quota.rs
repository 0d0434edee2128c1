/*! Multi-key sampling budgets.

A [QuotaTracker] holds the remaining acceptance counts of one source for
one run, keyed per year plus a run-wide total. Budgets only move downward;
keys absent from the configuration read as exhausted, so unconfigured
strata can never be sampled.
!*/
use std::collections::HashMap;

/// Stratification key. Years and the run-wide total live in the same
/// tracker without resorting to mixed-type map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaKey {
    Year(u16),
    Total,
}

/// Remaining-count budget for one (source, run) pair.
#[derive(Debug, Clone)]
pub struct QuotaTracker {
    remaining: HashMap<QuotaKey, usize>,
}

impl QuotaTracker {
    pub fn new(per_year: &HashMap<u16, usize>, total: usize) -> Self {
        let mut remaining: HashMap<QuotaKey, usize> = per_year
            .iter()
            .map(|(year, count)| (QuotaKey::Year(*year), *count))
            .collect();
        remaining.insert(QuotaKey::Total, total);
        Self { remaining }
    }

    /// Remaining budget for `key`. Unconfigured keys are 0.
    pub fn remaining(&self, key: QuotaKey) -> usize {
        self.remaining.get(&key).copied().unwrap_or(0)
    }

    pub fn exhausted(&self, key: QuotaKey) -> bool {
        self.remaining(key) == 0
    }

    /// Consume one unit of `key`'s budget.
    ///
    /// Callers check [QuotaTracker::exhausted] before selecting, so the
    /// count never goes below zero. There is no rollback.
    pub fn decrement(&mut self, key: QuotaKey) {
        debug_assert!(!self.exhausted(key), "decrement on exhausted {:?}", key);
        if let Some(count) = self.remaining.get_mut(&key) {
            *count = count.saturating_sub(1);
        }
    }
}
