use std::sync::atomic::{AtomicU64, Ordering};

/// Lookup counters for a [`Router`](super::Router)
///
/// All counters use relaxed atomics; they are observational and never gate
/// routing decisions.
///
/// - `lookups`: every call to `resolve`
/// - `cache_hits`: lookups answered from the cache
/// - `walks`: trie walks performed (cache misses and `allowed_methods`)
/// - `not_found`: lookups that resolved to nothing
#[derive(Debug, Default)]
pub struct RouterStats {
    lookups: AtomicU64,
    cache_hits: AtomicU64,
    walks: AtomicU64,
    not_found: AtomicU64,
}

/// Plain copy of [`RouterStats`] at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub lookups: u64,
    pub cache_hits: u64,
    pub walks: u64,
    pub not_found: u64,
}

impl RouterStats {
    #[inline]
    pub(crate) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_walk(&self) {
        self.walks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Total number of `resolve` calls
    #[must_use]
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Lookups served from the cache
    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Trie walks performed
    #[must_use]
    pub fn walks(&self) -> u64 {
        self.walks.load(Ordering::Relaxed)
    }

    /// Lookups that found no handler
    #[must_use]
    pub fn not_found(&self) -> u64 {
        self.not_found.load(Ordering::Relaxed)
    }

    /// Read all counters at once
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            lookups: self.lookups(),
            cache_hits: self.cache_hits(),
            walks: self.walks(),
            not_found: self.not_found(),
        }
    }
}
