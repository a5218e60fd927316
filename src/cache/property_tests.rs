//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check expiry, invalidation, statistics and key shapes.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock, Resource};

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9:_]{1,32}"
}

/// Generates tags from a small alphabet so tags overlap often
fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-e]"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

fn store_at(start_ms: u64) -> (CacheStore<String>, ManualClock) {
    let clock = ManualClock::new(start_ms);
    (CacheStore::with_clock(Arc::new(clock.clone())), clock)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, tags: Vec<String> },
    Get { key: String },
    Invalidate { tag: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (
            key_strategy(),
            value_strategy(),
            prop::collection::vec(tag_strategy(), 0..3)
        )
            .prop_map(|(key, value, tags)| CacheOp::Set { key, value, tags }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        tag_strategy().prop_map(|tag| CacheOp::Invalidate { tag }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An entry stored with ttl T is readable for any elapsed time below
    // T * 1000 ms and gone from T * 1000 ms on.
    #[test]
    fn prop_ttl_boundary(
        key in key_strategy(),
        value in value_strategy(),
        ttl in 1u64..3_600,
        elapsed_ms in 0u64..7_200_000,
    ) {
        let (mut store, clock) = store_at(1_000_000);
        store.set(key.clone(), value.clone(), ttl, Vec::<String>::new());

        clock.advance(Duration::from_millis(elapsed_ms));

        if elapsed_ms < ttl * 1000 {
            prop_assert_eq!(store.get(&key), Some(value));
        } else {
            prop_assert_eq!(store.get(&key), None);
            prop_assert!(store.is_empty(), "Expired entry should leave the live map on read");
        }
    }

    // Invalidating a tag removes exactly the entries that currently carry it.
    #[test]
    fn prop_tag_invalidation_matches_model(
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
        target in tag_strategy(),
    ) {
        let (mut store, _) = store_at(0);
        let mut model: HashMap<String, HashSet<String>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value, tags } => {
                    model.insert(key.clone(), tags.iter().cloned().collect());
                    store.set(key, value, 600, tags);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key).is_some(), model.contains_key(&key));
                }
                CacheOp::Invalidate { tag } => {
                    let expected = model.values().filter(|tags| tags.contains(&tag)).count();
                    model.retain(|_, tags| !tags.contains(&tag));
                    prop_assert_eq!(store.invalidate_by_tag(&tag), expected);
                }
            }
        }

        model.retain(|_, tags| !tags.contains(&target));
        store.invalidate_by_tag(&target);

        let mut expected_keys: Vec<String> = model.keys().cloned().collect();
        expected_keys.sort();
        prop_assert_eq!(store.keys(), expected_keys);
        prop_assert!(!store.has_tag(&target));
    }

    // Hits and misses add up to the number of lookups.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let (mut store, _) = store_at(0);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value, tags } => store.set(key, value, 600, tags),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Invalidate { tag } => {
                    store.invalidate_by_tag(&tag);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // Storing V1 then V2 under one key returns V2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
    ) {
        let (mut store, _) = store_at(0);

        store.set(key.clone(), value1, 60, ["a"]);
        store.set(key.clone(), value2.clone(), 60, ["b"]);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.invalidate_by_tag("a"), 0);
    }

    // Requests differing in any response-affecting parameter get distinct keys.
    #[test]
    fn prop_key_sensitivity(
        id_a in 0u64..10_000,
        id_b in 0u64..10_000,
        page_a in 1u32..50,
        page_b in 1u32..50,
        limit in 1u32..100,
        flags_a in any::<(bool, bool)>(),
        flags_b in any::<(bool, bool)>(),
        query in "[a-z]{1,12}",
    ) {
        let products = Resource::Products;

        let list_a = products.list_key(&[flags_a.0, flags_a.1]);
        let list_b = products.list_key(&[flags_b.0, flags_b.1]);
        prop_assert_eq!(list_a == list_b, flags_a == flags_b);

        let detail_a = products.detail_key(id_a, &[flags_a.0, flags_a.1]);
        let detail_b = products.detail_key(id_b, &[flags_b.0, flags_b.1]);
        prop_assert_eq!(detail_a == detail_b, id_a == id_b && flags_a == flags_b);

        let search_a = products.search_key(&query, page_a, limit);
        let search_b = products.search_key(&query, page_b, limit);
        prop_assert_eq!(search_a == search_b, page_a == page_b);

        let skus = [format!("SKU{id_a}"), format!("SKU{id_b}")];
        let filter_a = products.filter_key(&skus, page_a, limit, flags_a.0);
        let filter_b = products.filter_key(&skus, page_b, limit, flags_a.0);
        prop_assert_eq!(filter_a == filter_b, page_a == page_b);

        let variations_a = products.variations_key(id_a);
        let variations_b = products.variations_key(id_b);
        prop_assert_eq!(variations_a == variations_b, id_a == id_b);
    }

    // SKU lists are keyed in caller order.
    #[test]
    fn prop_filter_key_order_sensitive(skus in prop::collection::vec("[A-Z0-9]{1,8}", 2..6)) {
        let mut reversed = skus.clone();
        reversed.reverse();

        let forward = Resource::Products.filter_key(&skus, 1, 10, true);
        let backward = Resource::Products.filter_key(&reversed, 1, 10, true);

        prop_assert_eq!(forward == backward, skus == reversed);
    }

    // Different non-empty SKU lists never share a key, even with delimiters inside SKUs.
    #[test]
    fn prop_filter_key_distinguishes_sku_lists(
        a in prop::collection::vec("[AB,:%]{0,3}", 1..4),
        b in prop::collection::vec("[AB,:%]{0,3}", 1..4),
    ) {
        let key_a = Resource::Products.filter_key(&a, 1, 10, true);
        let key_b = Resource::Products.filter_key(&b, 1, 10, true);

        prop_assert_eq!(key_a == key_b, a == b);
    }
}
