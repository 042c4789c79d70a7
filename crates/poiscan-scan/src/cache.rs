//! Bounded, time-aware cache of past scan results.
//!
//! Entries are keyed by the scan center rounded to three decimals (about
//! 111 m at the equator) plus the radius, so small pans reuse one slot.
//! At most [`CACHE_CAPACITY`] entries are kept; the oldest insertion is
//! evicted first. Staleness is only checked on lookup and never deletes an
//! entry.

use chrono::{DateTime, TimeDelta, Utc};

use poiscan_core::CacheEntry;

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub const CACHE_KEY: &str = "md_results_cache";
pub const CACHE_CAPACITY: usize = 10;
/// Entries younger than this are offered for reuse (30 minutes).
pub const DEFAULT_MAX_AGE_MS: i64 = 1_800_000;

/// `"{lat},{lng},{radius}"` with both coordinates rounded half-up to three
/// decimals and printed in shortest form (`40.7`, not `40.700`).
#[must_use]
pub fn cache_key(lat: f64, lng: f64, radius_m: u32) -> String {
    format!("{},{},{}", round3(lat), round3(lng), radius_m)
}

/// Whether `entry` is younger than `max_age` at `now`.
#[must_use]
pub fn is_fresh(entry: &CacheEntry, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
    now.signed_duration_since(entry.timestamp) < max_age
}

fn round3(value: f64) -> f64 {
    // Half-up like `floor(x + 0.5)`; adding 0.0 turns -0.0 into 0.0 so keys
    // never print as "-0".
    (value * 1000.0 + 0.5).floor() / 1000.0 + 0.0
}

#[derive(Debug)]
pub struct ResultCache<K> {
    store: K,
    entries: Vec<CacheEntry>,
}

impl<K: KeyValueStore> ResultCache<K> {
    /// Loads the persisted entries. An undecodable value loads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn load(store: K) -> Result<Self, StoreError> {
        let mut entries: Vec<CacheEntry> = store.get_json(CACHE_KEY)?.unwrap_or_default();
        if entries.len() > CACHE_CAPACITY {
            entries.drain(..entries.len() - CACHE_CAPACITY);
        }
        tracing::debug!(entries = entries.len(), "loaded result cache");
        Ok(Self { store, entries })
    }

    /// All entries, oldest insertion first.
    #[must_use]
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CacheEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key lookup. Stale entries are returned too.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.iter().rev().find(|e| e.cache_key == key)
    }

    /// [`find`](Self::find) restricted to fresh entries.
    #[must_use]
    pub fn find_fresh(
        &self,
        key: &str,
        now: DateTime<Utc>,
        max_age: TimeDelta,
    ) -> Option<&CacheEntry> {
        self.find(key).filter(|entry| is_fresh(entry, now, max_age))
    }

    /// Inserts `entry`, replacing any entry with the same key and evicting
    /// the oldest insertions beyond [`CACHE_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the cache cannot be persisted; the
    /// in-memory entries are left unchanged in that case.
    pub fn put(&mut self, entry: CacheEntry) -> Result<(), StoreError> {
        let mut next: Vec<CacheEntry> = self
            .entries
            .iter()
            .filter(|e| e.cache_key != entry.cache_key)
            .cloned()
            .collect();
        next.push(entry);
        if next.len() > CACHE_CAPACITY {
            let evicted = next.len() - CACHE_CAPACITY;
            next.drain(..evicted);
            tracing::debug!(evicted, "evicted oldest cache entries");
        }

        self.store.set_json(CACHE_KEY, &next)?;
        self.entries = next;
        Ok(())
    }

    /// Drops every entry and the persisted copy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the persisted copy cannot be removed.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(CACHE_KEY)?;
        self.entries.clear();
        tracing::info!("result cache cleared");
        Ok(())
    }
}
