//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check lookup, overwrite and sweep behavior of the store.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys, including the empty key
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{0,32}"
}

/// Generates arbitrary byte values, including empty ones
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// A single operation against the store
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Adding a value and reading it back before any sweep returns the same bytes.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_TTL);

        store.add(key.clone(), Bytes::from(value.clone()));

        let retrieved = store.get(&key);
        prop_assert_eq!(retrieved.as_deref(), Some(value.as_slice()), "Round-trip value mismatch");
    }

    // A key that was never added is absent, every time, and looking it up changes nothing.
    #[test]
    fn prop_absent_key_is_consistent_miss(
        keys in prop::collection::hash_set(key_strategy(), 0..20),
        missing in key_strategy(),
        lookups in 1usize..10
    ) {
        prop_assume!(!keys.contains(&missing));

        let mut store = CacheStore::new(TEST_TTL);
        for key in &keys {
            store.add(key.clone(), Bytes::from(key.clone()));
        }

        for _ in 0..lookups {
            prop_assert_eq!(store.get(&missing), None);
        }
        prop_assert_eq!(store.len(), keys.len(), "Misses should not change the store");
        prop_assert_eq!(store.stats().misses, lookups as u64);
    }

    // The last write to a key wins and only one entry exists for it.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(TEST_TTL);

        store.add(key.clone(), Bytes::from(value1));
        store.add(key.clone(), Bytes::from(value2.clone()));

        let retrieved = store.get(&key);
        prop_assert_eq!(retrieved.as_deref(), Some(value2.as_slice()), "Overwrite should return new value");
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // For any operation sequence, the store behaves like a plain map with one
    // entry per key, and the statistics count every lookup.
    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_TTL);
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    store.add(key.clone(), Bytes::from(value.clone()));
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let actual = store.get(&key);
                    let expected = model.get(&key);
                    prop_assert_eq!(actual.as_deref(), expected.map(Vec::as_slice));
                    if expected.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(store.len(), model.len(), "One entry per distinct key");
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // A sweep at time `now` removes exactly the entries older than the TTL.
    #[test]
    fn prop_sweep_removes_exactly_stale(
        ages_ms in prop::collection::vec(0u64..600_000, 1..40)
    ) {
        let mut store = CacheStore::new(TEST_TTL);
        let base = Instant::now();
        let now = base + Duration::from_secs(600);

        // Entry i is created `ages_ms[i]` before `now`
        for (i, age) in ages_ms.iter().enumerate() {
            let created = now - Duration::from_millis(*age);
            store.add_at(format!("key{}", i), Bytes::new(), created);
        }

        let expected_stale = ages_ms
            .iter()
            .filter(|age| Duration::from_millis(**age) > TEST_TTL)
            .count();

        let removed = store.sweep_expired(now);
        prop_assert_eq!(removed, expected_stale);
        prop_assert_eq!(store.len(), ages_ms.len() - expected_stale);

        for (i, age) in ages_ms.iter().enumerate() {
            let present = store.get(&format!("key{}", i)).is_some();
            prop_assert_eq!(present, Duration::from_millis(*age) <= TEST_TTL);
        }
    }
}
