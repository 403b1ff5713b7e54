//! Explicit memoization for engine results
//!
//! The hosting application recomputes reactively on input change. Engine
//! functions are pure, so a host that calls them from a render loop can wrap
//! each in a [`Memo`] keyed by a hash of the transaction snapshot plus
//! config. The cache is a single slot: a new key evicts the old value, which
//! matches the reactive pattern (only the latest snapshot matters).

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::model::Transaction;

/// Hash a transaction snapshot into a cache key.
///
/// Hashes every field that affects engine output. Amounts are hashed through
/// their bit patterns, so any change to a record produces a different key.
#[must_use]
pub fn snapshot_key(transactions: &[Transaction]) -> u64 {
    let mut hasher = FxHasher::default();
    transactions.len().hash(&mut hasher);
    for tx in transactions {
        tx.id.hash(&mut hasher);
        (tx.date.year(), tx.date.month(), tx.date.day()).hash(&mut hasher);
        tx.kind.hash(&mut hasher);
        tx.amount.to_bits().hash(&mut hasher);
        tx.category_id.hash(&mut hasher);
    }
    hasher.finish()
}

/// Fold extra hashable state (granularity, thresholds, horizon) into a key.
#[must_use]
pub fn key_with<K: Hash>(base: u64, extra: &K) -> u64 {
    let mut hasher = FxHasher::default();
    base.hash(&mut hasher);
    extra.hash(&mut hasher);
    hasher.finish()
}

/// Single-slot memo cell for one engine result.
#[derive(Debug, Default)]
pub struct Memo<T> {
    slot: Option<(u64, T)>,
}

impl<T> Memo<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Return the cached value for `key`, computing and storing it first if
    /// the slot is empty or holds a different key.
    pub fn get_or_compute(&mut self, key: u64, compute: impl FnOnce() -> T) -> &T {
        let hit = matches!(self.slot, Some((cached, _)) if cached == key);
        if !hit {
            self.slot = Some((key, compute()));
        }
        match &self.slot {
            Some((_, value)) => value,
            None => unreachable!("slot populated above"),
        }
    }

    /// Drop any cached value.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_memo_computes_once_per_key() {
        let calls = Cell::new(0);
        let mut memo = Memo::new();

        let first = *memo.get_or_compute(7, || {
            calls.set(calls.get() + 1);
            42
        });
        let second = *memo.get_or_compute(7, || {
            calls.set(calls.get() + 1);
            42
        });

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_memo_recomputes_on_new_key() {
        let mut memo = Memo::new();
        assert_eq!(*memo.get_or_compute(1, || "a"), "a");
        assert_eq!(*memo.get_or_compute(2, || "b"), "b");
        // Single slot: going back to the old key recomputes
        assert_eq!(*memo.get_or_compute(1, || "c"), "c");
    }

    #[test]
    fn test_memo_invalidate() {
        let mut memo = Memo::new();
        assert_eq!(*memo.get_or_compute(1, || 10), 10);
        memo.invalidate();
        assert_eq!(*memo.get_or_compute(1, || 20), 20);
    }

    #[test]
    fn test_key_with_mixes_extra_state() {
        let base = 99u64;
        assert_ne!(key_with(base, &"monthly"), key_with(base, &"weekly"));
        assert_eq!(key_with(base, &"monthly"), key_with(base, &"monthly"));
    }
}
