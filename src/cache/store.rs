//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a tag index and TTL expiration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Lookup ==
/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Entry present and within its TTL
    Fresh(V),
    /// Entry is past its TTL; its last value is handed back for fallback
    /// use only and is never served as fresh
    Expired(V),
    /// No entry under the key
    Missing,
}

impl<V> Lookup<V> {
    /// Returns the value only if it was fresh.
    pub fn fresh(self) -> Option<V> {
        match self {
            Lookup::Fresh(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Lookup::Fresh(_))
    }

    /// Maps the carried value, keeping the variant.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Lookup<U> {
        match self {
            Lookup::Fresh(value) => Lookup::Fresh(f(value)),
            Lookup::Expired(value) => Lookup::Expired(f(value)),
            Lookup::Missing => Lookup::Missing,
        }
    }
}

// == Cache Store ==
/// Key-value storage with per-entry TTL and tag-based invalidation.
///
/// Every operation is total: unknown keys miss and unknown tags are no-ops.
///
/// An entry past its TTL leaves the live map and keeps its last value in a
/// stale slot, with its tag registrations intact. [`get`](Self::get) never
/// reads the stale slot; [`lookup`](Self::lookup) reports it as
/// [`Lookup::Expired`] until the key is overwritten, invalidated or cleared.
/// A key lives in at most one of the two maps.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Live entries
    entries: HashMap<String, CacheEntry<V>>,
    /// Last value of entries that passed their TTL
    stale: HashMap<String, CacheEntry<V>>,
    /// Tag -> keys (live or stale) registered under it
    tag_index: HashMap<String, HashSet<String>>,
    /// Performance statistics
    stats: CacheStats,
    /// Time source for stamping and expiry
    clock: Arc<dyn Clock>,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stale: HashMap::new(),
            tag_index: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key` with the given TTL and tags.
    ///
    /// Overwrites any existing entry (last write wins, no merge). The previous
    /// entry's tag registrations are dropped before the new ones are added.
    pub fn set<I, S>(&mut self, key: impl Into<String>, value: V, ttl_seconds: u64, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        self.remove_entry(&key);

        let tags: HashSet<String> = tags.into_iter().map(Into::into).collect();
        for tag in &tags {
            self.tag_index
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }

        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl_seconds, tags);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Lookup ==
    /// Looks up `key`, retiring the entry to the stale slot if it has expired.
    pub fn lookup(&mut self, key: &str) -> Lookup<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                return Lookup::Fresh(entry.value.clone());
            }
            Some(_) => self.retire(key),
            None => {}
        }

        self.stats.record_miss();
        match self.stale.get(key) {
            Some(entry) => Lookup::Expired(entry.value.clone()),
            None => Lookup::Missing,
        }
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// An expired entry found here is retired, never returned.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.lookup(key).fresh()
    }

    // == Invalidate ==
    /// Removes every entry registered under `tag`, then the tag itself.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let Some(keys) = self.tag_index.remove(tag) else {
            return 0;
        };

        let removed = keys
            .iter()
            .filter(|key| self.remove_entry(key).is_some())
            .count();
        self.stats.record_invalidations(removed);
        removed
    }

    /// Applies [`invalidate_by_tag`](Self::invalidate_by_tag) to each tag.
    pub fn invalidate_by_tags<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(|tag| self.invalidate_by_tag(tag.as_ref()))
            .sum()
    }

    // == Clear ==
    /// Removes all entries, stale values and tag registrations.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stale.clear();
        self.tag_index.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup Expired ==
    /// Retires every expired live entry to the stale slot.
    ///
    /// Returns the number of entries retired.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.retire(key);
        }
        expired_keys.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Introspection ==
    /// Returns the number of live entries, expired or not. Stale values are
    /// not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the live keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Returns true if at least one live entry is registered under `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_index
            .get(tag)
            .is_some_and(|keys| keys.iter().any(|key| self.entries.contains_key(key)))
    }

    // == Retire ==
    /// Moves an expired live entry to the stale slot, keeping its tags.
    fn retire(&mut self, key: &str) {
        if let Some(entry) = self.entries.remove(key) {
            self.stale.insert(key.to_string(), entry);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
    }

    // == Remove Entry ==
    /// Removes a key's live entry and stale value and unlinks its tags.
    ///
    /// Returns the live entry, if there was one.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let live = self.entries.remove(key);
        let stale = self.stale.remove(key);
        if let Some(removed) = live.as_ref().or(stale.as_ref()) {
            for tag in &removed.tags {
                if let Some(keys) = self.tag_index.get_mut(tag) {
                    keys.remove(key);
                    if keys.is_empty() {
                        self.tag_index.remove(tag);
                    }
                }
            }
        }
        self.stats.set_total_entries(self.entries.len());
        live
    }
}
