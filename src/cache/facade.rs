//! Cache Facade Module
//!
//! Shared handle over a single [`CacheStore`], with a global view and a
//! user-scoped view. Values are stored as JSON and typed at each call site.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore, Clock, Lookup, SystemClock};

/// Namespace of keys and tags written through a user-scoped view. The shared
/// view neither reads nor writes names starting with `user:`.
const USER_SCOPE_PREFIX: &str = "user";

fn is_user_scoped(name: &str) -> bool {
    name.strip_prefix(USER_SCOPE_PREFIX)
        .is_some_and(|rest| rest.starts_with(':'))
}

// == Cache Options ==
/// TTL and tags applied on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    pub ttl_seconds: u64,
    pub tags: Vec<String>,
}

impl CacheOptions {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

// == Cache ==
/// Process-wide cache handle.
///
/// Clones share one store, so a value written through any clone (or any
/// user-scoped view of it) is visible to every other clone. Build one at
/// startup and pass clones to each service.
///
/// Reads and writes are synchronous and serialized by a single mutex.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<Mutex<CacheStore<Value>>>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(CacheStore::with_clock(clock))),
        }
    }

    // A panic while holding the lock cannot leave a half-written entry
    // behind, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, CacheStore<Value>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Returns the fresh value under `key`, typed as `T`.
    ///
    /// A stored value that does not deserialize into `T` counts as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.lookup(key).fresh()
    }

    /// Like [`get`](Self::get) but also hands back the last value of an
    /// expired entry, for stale-on-error fallback.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        if is_user_scoped(key) {
            warn!(key, "key is reserved for user scopes");
            return Lookup::Missing;
        }
        self.lookup_raw(key)
    }

    fn lookup_raw<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        let raw = self.lock().lookup(key);
        match raw {
            Lookup::Fresh(value) => match decode(key, value) {
                Some(typed) => {
                    debug!(key, "cache hit");
                    Lookup::Fresh(typed)
                }
                None => Lookup::Missing,
            },
            Lookup::Expired(value) => {
                debug!(key, "cache entry expired");
                decode(key, value).map_or(Lookup::Missing, Lookup::Expired)
            }
            Lookup::Missing => {
                debug!(key, "cache miss");
                Lookup::Missing
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` with the given TTL and tags.
    ///
    /// Values that cannot be represented as JSON, and keys or tags in the
    /// user namespace, are skipped with a warning.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, options: &CacheOptions) {
        if is_user_scoped(key) || options.tags.iter().any(|tag| is_user_scoped(tag)) {
            warn!(key, tags = ?options.tags, "name is reserved for user scopes, skipping");
            return;
        }
        self.set_raw(key, value, options);
    }

    fn set_raw<T: Serialize + ?Sized>(&self, key: &str, value: &T, options: &CacheOptions) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(err) => {
                warn!(key, error = %err, "value not cacheable, skipping");
                return;
            }
        };

        self.lock()
            .set(key, json, options.ttl_seconds, options.tags.iter().cloned());
        debug!(key, ttl = options.ttl_seconds, tags = ?options.tags, "cache store");
    }

    // == Invalidate ==
    /// Removes every entry carrying any of `tags`. Returns the number removed.
    ///
    /// Tags in the user namespace are ignored; use [`UserCache::invalidate`].
    pub fn invalidate<I, S>(&self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: Vec<S> = tags.into_iter().collect();
        let (reserved, names): (Vec<&str>, Vec<&str>) = tags
            .iter()
            .map(|tag| tag.as_ref())
            .partition(|tag| is_user_scoped(tag));
        if !reserved.is_empty() {
            warn!(tags = ?reserved, "tags are reserved for user scopes, ignoring");
        }
        self.invalidate_raw(&names)
    }

    fn invalidate_raw(&self, names: &[&str]) -> usize {
        let removed = self.lock().invalidate_by_tags(names);
        info!(tags = ?names, removed, "cache invalidated");
        removed
    }

    pub fn invalidate_tag(&self, tag: &str) -> usize {
        self.invalidate([tag])
    }

    // == Clear ==
    /// Removes every entry, shared and user-scoped.
    pub fn clear(&self) {
        self.lock().clear();
        info!("cache cleared");
    }

    /// Retires expired entries to their stale slots. Returns the number retired.
    pub fn cleanup_expired(&self) -> usize {
        self.lock().cleanup_expired()
    }

    // == Diagnostics ==
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }

    /// Returns true if both handles point at the same store.
    pub fn shares_store_with(&self, other: &Cache) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    // == User Scope ==
    /// Returns a view whose keys and tags live in `user_id`'s namespace.
    pub fn user(&self, user_id: impl Into<String>) -> UserCache {
        UserCache {
            cache: self.clone(),
            user_id: user_id.into(),
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(err) => {
            warn!(key, error = %err, "cached value has unexpected shape");
            None
        }
    }
}

// == User Cache ==
/// Per-user namespace over the shared store.
///
/// Keys and tags are prefixed with `user:<len>:<id>:`, where `<len>` is the
/// byte length of the id. The length makes the prefix unambiguous for ids
/// that contain `:`, so invalidating tags through one user's view never
/// touches another user's entries or the shared ones.
#[derive(Debug, Clone)]
pub struct UserCache {
    cache: Cache,
    user_id: String,
}

impl UserCache {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn scoped(&self, name: &str) -> String {
        format!(
            "{USER_SCOPE_PREFIX}:{}:{}:{name}",
            self.user_id.len(),
            self.user_id
        )
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.cache.lookup_raw(&self.scoped(key)).fresh()
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, options: &CacheOptions) {
        let scoped = CacheOptions {
            ttl_seconds: options.ttl_seconds,
            tags: options.tags.iter().map(|tag| self.scoped(tag)).collect(),
        };
        self.cache.set_raw(&self.scoped(key), value, &scoped);
    }

    pub fn invalidate<I, S>(&self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scoped: Vec<String> = tags
            .into_iter()
            .map(|tag| self.scoped(tag.as_ref()))
            .collect();
        let names: Vec<&str> = scoped.iter().map(String::as_str).collect();
        self.cache.invalidate_raw(&names)
    }
}
