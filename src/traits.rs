//! # Cache Trait Hierarchy
//!
//! Traits shared by the frequency cache and the code that drives it.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │                                         │
//!   │  remove(&mut, &K) → Option<V>           │
//!   │  remove_batch(&mut, &[K])               │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LfuCacheTrait<K, V>            │
//!   │                                         │
//!   │  peek_lfu(&) → (K, &V)                  │
//!   │  frequency(&, &K) → Option<u64>         │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `ConcurrentCache` is a `Send + Sync` marker for handles that can be
//! shared between request handlers without external locking.
//!
//! ## Thread Safety
//!
//! The core [`FrequencyCache`](crate::policy::lfu::FrequencyCache) takes
//! `&mut self` and is not synchronized. Services share a
//! [`ConcurrentFrequencyCache`](crate::policy::lfu::ConcurrentFrequencyCache)
//! instead, which implements [`ConcurrentCache`].

/// Core cache operations.
///
/// # Example
///
/// ```
/// use prefix_cache::policy::lfu::FrequencyCache;
/// use prefix_cache::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<i64, String>>(cache: &mut C, data: &[(i64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = FrequencyCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// cache's eviction policy before the new entry is inserted.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Counts as an access for the eviction policy. Use
    /// [`contains`](Self::contains) to check existence without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use prefix_cache::policy::lfu::FrequencyCache;
/// use prefix_cache::traits::{CoreCache, MutableCache};
///
/// fn invalidate_keys<C: MutableCache<i64, String>>(cache: &mut C, keys: &[i64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = FrequencyCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LFU-specific inspection.
///
/// # Example
///
/// ```
/// use prefix_cache::policy::lfu::FrequencyCache;
/// use prefix_cache::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache: FrequencyCache<&str> = FrequencyCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// cache.get(&1);
/// cache.get(&1);
///
/// assert_eq!(cache.frequency(&1), Some(3));
/// assert_eq!(cache.frequency(&2), Some(1));
///
/// // Keys 2 and 3 tie at frequency 1; the lower id is the victim.
/// assert_eq!(cache.peek_lfu().map(|(k, _)| k), Some(2));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Returns the entry the next eviction would remove, without removing it.
    ///
    /// Does not count as an access. Returns `None` if the cache is empty.
    fn peek_lfu(&self) -> Option<(K, &V)>;

    /// Returns the access frequency for a key, or `None` if absent.
    ///
    /// Does not count as an access.
    fn frequency(&self, key: &K) -> Option<u64>;
}

/// Marker trait for cache handles that are safe to use concurrently.
///
/// # Example
///
/// ```
/// use prefix_cache::policy::lfu::ConcurrentFrequencyCache;
/// use prefix_cache::traits::ConcurrentCache;
///
/// fn share<C: ConcurrentCache + Clone + 'static>(cache: &C) {
///     let cache = cache.clone();
///     std::thread::spawn(move || drop(cache)).join().unwrap();
/// }
///
/// share(&ConcurrentFrequencyCache::<String>::new(8));
/// ```
pub trait ConcurrentCache: Send + Sync {}
