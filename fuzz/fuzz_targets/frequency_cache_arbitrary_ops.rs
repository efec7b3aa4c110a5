#![no_main]

use libfuzzer_sys::fuzz_target;
use prefix_cache::policy::lfu::FrequencyCache;
use prefix_cache::traits::{CoreCache, LfuCacheTrait, MutableCache};

// Random sequences of put, get, remove, peek and clear. The first byte picks
// the capacity; each following triple is (op, id, value).
fuzz_target!(|data: &[u8]| {
    let Some((&capacity, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(capacity % 16);
    let mut cache: FrequencyCache<u8> = FrequencyCache::new(capacity);

    for chunk in ops.chunks_exact(3) {
        let id = i64::from(chunk[1] % 32);
        let value = chunk[2];

        match chunk[0] % 6 {
            0 => {
                let before = cache.frequency(&id);
                let victim = cache.peek_lfu().map(|(victim, _)| victim);
                let full = cache.len() == capacity;
                cache.insert(id, value);

                match before {
                    Some(freq) => {
                        assert_eq!(cache.frequency(&id), Some(freq.saturating_add(1)));
                    },
                    None if capacity == 0 => assert!(cache.is_empty()),
                    None => {
                        assert_eq!(cache.frequency(&id), Some(1));
                        if full {
                            let victim = victim.expect("full cache has a victim");
                            assert!(!cache.contains(&victim));
                        }
                    },
                }
            },
            1 => {
                let before = cache.frequency(&id);
                let hit = cache.get(&id).is_some();
                assert_eq!(hit, before.is_some());
                if let Some(freq) = before {
                    assert_eq!(cache.frequency(&id), Some(freq.saturating_add(1)));
                }
            },
            2 => {
                cache.remove(&id);
                assert!(!cache.contains(&id));
            },
            3 => {
                if let Some((victim, _)) = cache.peek_lfu() {
                    let min = cache.frequency(&victim).unwrap();
                    for other in 0..32 {
                        if let Some(freq) = cache.frequency(&other) {
                            assert!((freq, other) >= (min, victim));
                        }
                    }
                }
            },
            4 => {
                let _ = cache.contains(&id);
            },
            5 => {
                cache.clear();
                assert!(cache.is_empty());
            },
            _ => unreachable!(),
        }

        cache.check_invariants().unwrap();
    }
});
