//! Operator suppression lists.
//!
//! The whitelist hides individual places by identifier; the blacklist hides
//! whole category types by excluding them from the upstream request. Both
//! are loaded once at construction and written through on every change.

use std::collections::BTreeSet;

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub const WHITELIST_KEY: &str = "md_whitelist";
pub const BLACKLIST_KEY: &str = "md_type_blacklist";

/// Category types excluded on first run, before the operator has saved a
/// blacklist of their own.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "bus_stop",
    "public_bathroom",
    "doctor",
    "consultant",
    "transit_station",
    "playground",
    "swimming_pool",
];

#[derive(Debug)]
pub struct SuppressionStore<K> {
    store: K,
    whitelist: BTreeSet<String>,
    /// Lower-cased, de-duplicated, in insertion order.
    blacklist: Vec<String>,
}

impl<K: KeyValueStore> SuppressionStore<K> {
    /// Loads both lists from `store`.
    ///
    /// A missing blacklist is seeded with [`DEFAULT_BLACKLIST`]; a saved
    /// empty one stays empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn load(store: K) -> Result<Self, StoreError> {
        let whitelist: BTreeSet<String> = store
            .get_json::<Vec<String>>(WHITELIST_KEY)?
            .unwrap_or_default()
            .into_iter()
            .collect();

        let blacklist = match store.get_json::<Vec<String>>(BLACKLIST_KEY)? {
            Some(saved) => dedup_lowercase(saved),
            None => DEFAULT_BLACKLIST.iter().map(|t| (*t).to_string()).collect(),
        };

        tracing::debug!(
            whitelisted = whitelist.len(),
            blacklisted = blacklist.len(),
            "loaded suppression lists"
        );

        Ok(Self {
            store,
            whitelist,
            blacklist,
        })
    }

    #[must_use]
    pub fn is_whitelisted(&self, id: &str) -> bool {
        self.whitelist.contains(id)
    }

    #[must_use]
    pub fn whitelist(&self) -> &BTreeSet<String> {
        &self.whitelist
    }

    /// Adds a place to the whitelist. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the updated list cannot be persisted; the
    /// in-memory list is left unchanged in that case.
    pub fn add_to_whitelist(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.whitelist.contains(id) {
            return Ok(false);
        }
        let mut next = self.whitelist.clone();
        next.insert(id.to_string());
        self.store
            .set_json(WHITELIST_KEY, &next.iter().collect::<Vec<_>>())?;
        self.whitelist = next;
        tracing::info!(id, "place whitelisted");
        Ok(true)
    }

    /// Blacklisted type tags, lower-cased, in the order they were added.
    #[must_use]
    pub fn blacklisted_types(&self) -> &[String] {
        &self.blacklist
    }

    #[must_use]
    pub fn is_blacklisted(&self, type_tag: &str) -> bool {
        let tag = type_tag.trim().to_lowercase();
        self.blacklist.contains(&tag)
    }

    /// Adds a category type (lower-cased) to the blacklist. Returns `false`
    /// if it was already present or blank.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the updated list cannot be persisted.
    pub fn add_to_blacklist(&mut self, type_tag: &str) -> Result<bool, StoreError> {
        let tag = type_tag.trim().to_lowercase();
        if tag.is_empty() || self.blacklist.contains(&tag) {
            return Ok(false);
        }
        let mut next = self.blacklist.clone();
        next.push(tag);
        self.persist_blacklist(next)?;
        tracing::info!(type_tag, "type blacklisted");
        Ok(true)
    }

    /// Removes a category type from the blacklist. Returns `false` if it was
    /// not present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the updated list cannot be persisted.
    pub fn remove_from_blacklist(&mut self, type_tag: &str) -> Result<bool, StoreError> {
        let tag = type_tag.trim().to_lowercase();
        if !self.blacklist.contains(&tag) {
            return Ok(false);
        }
        let next: Vec<String> = self
            .blacklist
            .iter()
            .filter(|t| **t != tag)
            .cloned()
            .collect();
        self.persist_blacklist(next)?;
        tracing::info!(type_tag, "type removed from blacklist");
        Ok(true)
    }

    fn persist_blacklist(&mut self, next: Vec<String>) -> Result<(), StoreError> {
        self.store.set_json(BLACKLIST_KEY, &next)?;
        self.blacklist = next;
        Ok(())
    }
}

fn dedup_lowercase(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::FailingStore;
    use crate::store::MemoryStore;

    #[test]
    fn first_run_seeds_default_blacklist() {
        let suppression = SuppressionStore::load(MemoryStore::new()).unwrap();
        assert_eq!(suppression.blacklisted_types(), DEFAULT_BLACKLIST);
        assert!(suppression.whitelist().is_empty());
    }

    #[test]
    fn saved_empty_blacklist_is_not_reseeded() {
        let store = MemoryStore::new();
        store.set(BLACKLIST_KEY, "[]").unwrap();
        let suppression = SuppressionStore::load(store).unwrap();
        assert!(suppression.blacklisted_types().is_empty());
    }

    #[test]
    fn emptied_blacklist_stays_empty_after_reload() {
        let store = MemoryStore::new();
        let mut suppression = SuppressionStore::load(store.clone()).unwrap();
        for tag in DEFAULT_BLACKLIST {
            assert!(suppression.remove_from_blacklist(tag).unwrap());
        }

        let reloaded = SuppressionStore::load(store).unwrap();
        assert!(reloaded.blacklisted_types().is_empty());
    }

    #[test]
    fn undecodable_blacklist_falls_back_to_seed() {
        let store = MemoryStore::new();
        store.set(BLACKLIST_KEY, r#"{"bus_stop": true}"#).unwrap();
        let suppression = SuppressionStore::load(store).unwrap();
        assert_eq!(suppression.blacklisted_types().len(), DEFAULT_BLACKLIST.len());
    }

    #[test]
    fn whitelist_add_is_idempotent_and_persisted() {
        let store = MemoryStore::new();
        let mut suppression = SuppressionStore::load(store.clone()).unwrap();

        assert!(suppression.add_to_whitelist("id-1").unwrap());
        assert!(!suppression.add_to_whitelist("id-1").unwrap());
        assert!(suppression.is_whitelisted("id-1"));
        assert!(!suppression.is_whitelisted("id-2"));

        let saved: Vec<String> = store.get_json(WHITELIST_KEY).unwrap().unwrap();
        assert_eq!(saved, ["id-1"]);
    }

    #[test]
    fn blacklist_add_lowercases_and_dedups() {
        let store = MemoryStore::new();
        store.set(BLACKLIST_KEY, "[]").unwrap();
        let mut suppression = SuppressionStore::load(store.clone()).unwrap();

        assert!(suppression.add_to_blacklist("Gas_Station").unwrap());
        assert!(!suppression.add_to_blacklist("gas_station").unwrap());
        assert!(!suppression.add_to_blacklist("  ").unwrap());
        assert!(suppression.is_blacklisted("GAS_STATION"));

        let saved: Vec<String> = store.get_json(BLACKLIST_KEY).unwrap().unwrap();
        assert_eq!(saved, ["gas_station"]);
    }

    #[test]
    fn blacklist_remove_absent_is_noop() {
        let store = MemoryStore::new();
        store.set(BLACKLIST_KEY, r#"["bus_stop"]"#).unwrap();
        let mut suppression = SuppressionStore::load(store).unwrap();

        assert!(!suppression.remove_from_blacklist("cafe").unwrap());
        assert!(suppression.remove_from_blacklist("BUS_STOP").unwrap());
        assert!(suppression.blacklisted_types().is_empty());
    }

    #[test]
    fn loaded_blacklist_is_normalized() {
        let store = MemoryStore::new();
        store
            .set(BLACKLIST_KEY, r#"["Bus_Stop", "bus_stop", "Cafe"]"#)
            .unwrap();
        let suppression = SuppressionStore::load(store).unwrap();
        assert_eq!(suppression.blacklisted_types(), ["bus_stop", "cafe"]);
    }

    #[test]
    fn failed_whitelist_write_leaves_list_unchanged() {
        let store = FailingStore::default();
        let mut suppression = SuppressionStore::load(store.clone()).unwrap();
        suppression.add_to_whitelist("id-1").unwrap();

        store.fail_writes(true);
        assert!(suppression.add_to_whitelist("id-2").is_err());

        assert!(suppression.is_whitelisted("id-1"));
        assert!(!suppression.is_whitelisted("id-2"));
        assert_eq!(suppression.whitelist().len(), 1);
    }

    #[test]
    fn failed_blacklist_writes_leave_list_unchanged() {
        let store = FailingStore::default();
        let mut suppression = SuppressionStore::load(store.clone()).unwrap();

        store.fail_writes(true);
        assert!(suppression.add_to_blacklist("gas_station").is_err());
        assert!(suppression.remove_from_blacklist("bus_stop").is_err());

        assert!(!suppression.is_blacklisted("gas_station"));
        assert_eq!(suppression.blacklisted_types(), DEFAULT_BLACKLIST);
    }
}
