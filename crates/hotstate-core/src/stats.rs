//! Cache performance counters.
//!
//! Counters are fine-grained atomics bumped with relaxed ordering; they are
//! operational hints, not a consistency mechanism. [`Statistics`] is a plain
//! value copy read one counter at a time, so the copy can be mildly
//! inconsistent across counters. Consumers needing an exact figure must read
//! a single counter and compare it against itself over time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live atomic counters owned by the cache. All counters only increase.
#[derive(Debug, Default)]
pub struct CacheCounters {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) updates: AtomicU64,
    pub(crate) validation_errors: AtomicU64,
    pub(crate) reorgs: AtomicU64,
}

impl CacheCounters {
    #[inline]
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_validation_error(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_reorg(&self) {
        self.reorgs.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a value snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> Statistics {
        Statistics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            reorgs: self.reorgs.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Contract lookups that found an entry in the current snapshot.
    pub hits: u64,
    /// Contract lookups that missed the current snapshot.
    pub misses: u64,
    /// Snapshots published by the updater.
    pub updates: u64,
    /// Mismatches detected by the shadow validator.
    pub validation_errors: u64,
    /// Reorg handler invocations.
    pub reorgs: u64,
}
