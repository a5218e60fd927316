//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and tags.

use std::collections::HashSet;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Time to live in seconds
    pub ttl_seconds: u64,
    /// Tags the entry was registered under
    pub tags: HashSet<String>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `stored_at`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `stored_at` - Write time in Unix milliseconds
    /// * `ttl_seconds` - TTL in seconds
    /// * `tags` - Tags used for grouped invalidation
    pub fn new(value: V, stored_at: u64, ttl_seconds: u64, tags: HashSet<String>) -> Self {
        Self {
            value,
            stored_at,
            ttl_seconds,
            tags,
        }
    }

    /// Expiration timestamp in Unix milliseconds.
    pub fn expires_at(&self) -> u64 {
        self.stored_at
            .saturating_add(self.ttl_seconds.saturating_mul(1000))
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: an entry is expired once the full TTL has elapsed,
    /// i.e. when `now_ms - stored_at >= ttl_seconds * 1000`. A zero TTL entry
    /// is therefore never readable.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at().saturating_sub(now_ms)
    }

    /// Returns true if the entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> HashSet<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value", 1_000, 60, tags(&["products"]));

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.expires_at(), 61_000);
        assert!(entry.has_tag("products"));
        assert!(!entry.has_tag("banners"));
    }

    #[test]
    fn test_entry_valid_before_ttl() {
        let entry = CacheEntry::new("v", 1_000, 1, HashSet::new());

        assert!(!entry.is_expired(1_000));
        assert!(!entry.is_expired(1_999));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("v", 1_000, 1, HashSet::new());

        // Exactly ttl * 1000 ms later the entry is gone
        assert!(entry.is_expired(2_000), "Entry should be expired at boundary");
        assert!(entry.is_expired(5_000));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("v", 1_000, 0, HashSet::new());
        assert!(entry.is_expired(1_000));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new("v", 0, 10, HashSet::new());

        assert_eq!(entry.ttl_remaining_ms(0), 10_000);
        assert_eq!(entry.ttl_remaining_ms(9_500), 500);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let entry = CacheEntry::new("v", u64::MAX - 10, u64::MAX, HashSet::new());
        assert_eq!(entry.expires_at(), u64::MAX);
        assert!(!entry.is_expired(u64::MAX - 1));
    }
}
