//! Per-operation cache policies.

use crate::config::SdkConfig;

// == Cache Policy ==
/// How one read operation uses the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// TTL applied when storing a fetched payload
    pub ttl_seconds: u64,
    /// Serve the last cached value when the fetch fails with a network or
    /// 5xx error
    pub stale_on_error: bool,
}

impl CachePolicy {
    pub const fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            stale_on_error: false,
        }
    }

    pub const fn with_stale_on_error(mut self, enabled: bool) -> Self {
        self.stale_on_error = enabled;
        self
    }
}

// == Cache Policies ==
/// Policies for every cached read in the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicies {
    pub banners_list: CachePolicy,
    pub categories_list: CachePolicy,
    pub categories_detail: CachePolicy,
    pub products_list: CachePolicy,
    pub products_detail: CachePolicy,
    pub products_search: CachePolicy,
    pub products_filter: CachePolicy,
    pub products_variations: CachePolicy,
}

impl CachePolicies {
    /// Builds the policies with TTLs taken from `config`.
    ///
    /// List endpoints fall back to stale data; detail, search and filter
    /// reads always surface errors.
    pub fn from_config(config: &SdkConfig) -> Self {
        let standard = CachePolicy::new(config.cache_ttl);
        let search = CachePolicy::new(config.search_cache_ttl);
        Self {
            banners_list: standard.with_stale_on_error(true),
            categories_list: standard.with_stale_on_error(true),
            categories_detail: standard,
            products_list: standard.with_stale_on_error(true),
            products_detail: standard,
            products_search: search,
            products_filter: search,
            products_variations: standard,
        }
    }
}

impl Default for CachePolicies {
    fn default() -> Self {
        Self::from_config(&SdkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let policies = CachePolicies::default();

        assert_eq!(policies.products_list.ttl_seconds, 300);
        assert!(policies.products_list.stale_on_error);
        assert!(policies.banners_list.stale_on_error);
        assert!(!policies.products_detail.stale_on_error);
        assert_eq!(policies.products_search.ttl_seconds, 60);
        assert_eq!(policies.products_filter.ttl_seconds, 60);
    }

    #[test]
    fn test_policies_follow_config() {
        let config = SdkConfig {
            cache_ttl: 10,
            search_cache_ttl: 5,
            ..SdkConfig::default()
        };
        let policies = CachePolicies::from_config(&config);

        assert_eq!(policies.categories_detail, CachePolicy::new(10));
        assert_eq!(policies.products_search, CachePolicy::new(5));
    }
}
