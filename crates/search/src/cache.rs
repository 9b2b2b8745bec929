//! Result cache for main-keyword queries
//!
//! Memoizes the main-query step keyed by the raw keyword string, so two
//! keywords that normalize identically but differ in raw form are cached
//! separately. Entries are never evicted: the cache lives exactly as long as
//! the corpus it was filled from.
//!
//! # Thread Safety
//!
//! The map sits behind a mutex. `compute` runs outside the lock, so two
//! racing callers may both compute the same keyword; the first insert wins
//! and both observe a complete entry.

use pantry_core::RecordId;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cached id list, shared with every caller that hits it
pub type CachedIds = Arc<[RecordId]>;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to compute
    pub misses: u64,
    /// Stored keywords
    pub entries: usize,
}

/// Keyword -> id list memo
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: Mutex<FxHashMap<String, CachedIds>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored result for `keyword`, computing it on first use
    ///
    /// The second element is `true` when the result came from the cache.
    pub fn get_or_compute<F>(&self, keyword: &str, compute: F) -> (CachedIds, bool)
    where
        F: FnOnce() -> Vec<RecordId>,
    {
        if let Some(ids) = self.get(keyword) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(target: "pantry::cache", keyword, "Cache hit");
            return (ids, true);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(target: "pantry::cache", keyword, "Cache miss");

        let computed: CachedIds = compute().into();
        let stored = self
            .entries
            .lock()
            .entry(keyword.to_string())
            .or_insert(computed)
            .clone();
        (stored, false)
    }

    /// Stored result, if any
    pub fn get(&self, keyword: &str) -> Option<CachedIds> {
        self.entries.lock().get(keyword).cloned()
    }

    /// Number of stored keywords
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
