// ==============================================
// LRU SEMANTICS TESTS (integration)
// ==============================================
//
// End-to-end recency behavior exercised through the public thread-safe
// API, the way an embedding application drives the cache.

#![cfg(feature = "concurrency")]

use slickcache::builder::CacheBuilder;
use slickcache::cache::SlickCache;
use slickcache::policy::MaxSizeEvictionPolicy;

// ==============================================
// Fresh-Cache Behavior
// ==============================================

mod empty_start {
    use super::*;

    #[test]
    fn fresh_cache_misses_every_key() {
        let cache: SlickCache<i32, String> = SlickCache::try_new(3).unwrap();

        for key in [-1, 0, 1, 42, i32::MAX] {
            assert!(cache.get(&key).is_none());
        }
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Worked Example
// ==============================================
//
// Capacity 3; inserting (0,"0"), (1,"1"), (2,"4"), (3,"9") in order must
// evict exactly key 0 and keep the rest readable.

mod worked_example {
    use super::*;

    #[test]
    fn square_values_capacity_three() {
        let cache: SlickCache<i32, String> = SlickCache::try_new(3).unwrap();
        for key in 0..4 {
            cache.insert(key, (key * key).to_string());
        }

        assert!(cache.get(&0).is_none());
        assert_eq!(*cache.get(&1).unwrap(), "1");
        assert_eq!(*cache.get(&2).unwrap(), "4");
        assert_eq!(*cache.get(&3).unwrap(), "9");
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Recency Ordering
// ==============================================

mod recency {
    use super::*;

    #[test]
    fn reads_rescue_keys_from_eviction() {
        let cache: SlickCache<u32, u32> = SlickCache::try_new(4).unwrap();
        for key in 0..4 {
            cache.insert(key, key);
        }

        // Rescue the two oldest keys by reading them.
        assert!(cache.get(&0).is_some());
        assert!(cache.get(&1).is_some());

        cache.insert(4, 4);
        cache.insert(5, 5);

        assert!(cache.contains(&0));
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(!cache.contains(&3));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn long_insert_sequence_keeps_newest_window() {
        let capacity = 8;
        let cache: SlickCache<u64, u64> = SlickCache::try_new(capacity).unwrap();
        for key in 0..1000u64 {
            cache.insert(key, key);
        }

        assert_eq!(cache.len(), capacity);
        for key in 0..1000u64 {
            assert_eq!(cache.contains(&key), key >= 1000 - capacity as u64);
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn pop_lru_reflects_read_order_not_insert_order() {
        let cache: SlickCache<u32, u32> = SlickCache::try_new(3).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);
        cache.get(&1);

        let (first, _) = cache.pop_lru().unwrap();
        assert_eq!(first, 2);
        let (second, _) = cache.pop_lru().unwrap();
        assert_eq!(second, 3);
        let (third, _) = cache.pop_lru().unwrap();
        assert_eq!(third, 1);
    }
}

// ==============================================
// Update Semantics
// ==============================================

mod updates {
    use super::*;

    #[test]
    fn overwrite_changes_value_without_growing() {
        let cache: SlickCache<u32, String> = SlickCache::try_new(5).unwrap();
        cache.insert(1, "v1".to_string());
        cache.insert(1, "v2".to_string());

        assert_eq!(*cache.get(&1).unwrap(), "v2");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.occupancy(), 1);
    }

    #[test]
    fn capacity_one_update_never_evicts_the_sole_entry() {
        let cache: SlickCache<u32, String> = SlickCache::try_new(1).unwrap();
        cache.insert(1, "a".to_string());
        cache.insert(1, "b".to_string());
        cache.insert(1, "c".to_string());

        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&1).unwrap(), "c");
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Configuration Precedence
// ==============================================
//
// An explicit policy always wins over a numeric capacity supplied
// alongside it, regardless of which is smaller.

mod precedence {
    use super::*;

    #[test]
    fn policy_wins_when_capacity_is_smaller() {
        let cache = CacheBuilder::new()
            .capacity(1)
            .policy(MaxSizeEvictionPolicy::try_new(3).unwrap())
            .try_build::<u32, String>()
            .unwrap();

        cache.insert(0, "0".to_string());
        cache.insert(1, "1".to_string());

        assert_eq!(*cache.get(&0).unwrap(), "0");
        assert_eq!(*cache.get(&1).unwrap(), "1");
    }

    #[test]
    fn policy_wins_when_capacity_is_larger() {
        let cache = CacheBuilder::new()
            .capacity(100)
            .policy(MaxSizeEvictionPolicy::try_new(2).unwrap())
            .try_build::<u32, String>()
            .unwrap();

        for key in 0..3 {
            cache.insert(key, key.to_string());
        }
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&0));
    }

    #[test]
    fn unconfigured_builder_fails_up_front() {
        assert!(CacheBuilder::new().try_build::<u32, String>().is_err());
    }
}
