// ==============================================
// FREQUENCY CACHE BEHAVIOR (integration)
// ==============================================
//
// End-to-end eviction scenarios driven only through the public API.

mod eviction_scenarios {
    use prefix_cache::policy::lfu::FrequencyCache;
    use prefix_cache::traits::{CoreCache, LfuCacheTrait};

    #[test]
    fn accessed_entry_survives_insert_at_capacity() {
        let mut cache = FrequencyCache::new(2);
        cache.insert(1, "A");
        cache.insert(2, "B");
        assert_eq!(cache.get(&1), Some(&"A"));

        cache.insert(3, "C");

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&2));
        assert_eq!(cache.frequency(&1), Some(2));
        assert_eq!(cache.frequency(&3), Some(1));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn single_slot_always_replaces_resident() {
        let mut cache = FrequencyCache::new(1);
        cache.insert(1, "X");
        cache.get(&1);
        cache.get(&1);
        cache.insert(2, "Y");

        assert!(!cache.contains(&1));
        assert_eq!(cache.get(&2), Some(&"Y"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn overwrite_bumps_frequency_without_growing() {
        let mut cache = FrequencyCache::new(4);
        cache.insert(1, "A");
        let previous = cache.insert(1, "B");

        assert_eq!(previous, Some("A"));
        assert_eq!(cache.get(&1), Some(&"B"));
        // two puts plus the get above
        assert_eq!(cache.frequency(&1), Some(3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn frequency_ties_evict_the_lowest_id() {
        let mut cache = FrequencyCache::new(3);
        cache.insert(30, "c");
        cache.insert(10, "a");
        cache.insert(20, "b");

        assert_eq!(cache.peek_lfu().map(|(id, _)| id), Some(10));
        cache.insert(40, "d");

        assert!(!cache.contains(&10));
        assert!(cache.contains(&20));
        assert!(cache.contains(&30));
        assert!(cache.contains(&40));
    }

    #[test]
    fn overwrite_at_capacity_does_not_evict() {
        let mut cache = FrequencyCache::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(2, 20);

        assert!(cache.contains(&1));
        assert_eq!(cache.get(&2), Some(&20));
    }
}

// ==============================================
// Capacity-0 Behavior
// ==============================================

mod zero_capacity {
    use prefix_cache::policy::lfu::{ConcurrentFrequencyCache, FrequencyCache};
    use prefix_cache::traits::CoreCache;

    #[test]
    fn capacity_zero_is_honored() {
        let cache: FrequencyCache<i32> = FrequencyCache::new(0);
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn capacity_zero_rejects_inserts() {
        let mut cache = FrequencyCache::new(0);
        assert_eq!(cache.insert(1, 42), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn capacity_zero_shared_handle_stores_nothing() {
        let cache = ConcurrentFrequencyCache::new(0);
        cache.put(1, "x".to_string());
        assert!(cache.is_empty());
        assert_eq!(cache.get(1), None);
    }

    #[test]
    fn try_new_rejects_capacity_zero() {
        assert!(FrequencyCache::<i32>::try_new(0).is_err());
        assert!(ConcurrentFrequencyCache::<i32>::try_new(0).is_err());
    }
}

// ==============================================
// Removal and Reset
// ==============================================

mod removal_and_reset {
    use prefix_cache::policy::lfu::FrequencyCache;
    use prefix_cache::traits::{CoreCache, LfuCacheTrait, MutableCache};

    #[test]
    fn remove_absent_is_a_no_op() {
        let mut cache = FrequencyCache::new(2);
        cache.insert(1, "a");
        assert_eq!(cache.remove(&99), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reinserted_entry_starts_from_one() {
        let mut cache = FrequencyCache::new(2);
        cache.insert(1, "a");
        cache.get(&1);
        cache.remove(&1);
        cache.insert(1, "a");

        assert_eq!(cache.frequency(&1), Some(1));
    }

    #[test]
    fn cleared_cache_is_reusable() {
        let mut cache = FrequencyCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.peek_lfu(), None);

        cache.insert(3, "c");
        cache.insert(4, "d");
        cache.insert(5, "e");
        assert_eq!(cache.len(), 2);
        assert!(cache.check_invariants().is_ok());
    }
}
