//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity LRU cache whose storage is allocated once, at
//! construction, and then reused for the lifetime of the cache.
//!
//! # Algorithm
//!
//! The cache owns exactly `capacity` slots, all of them linked into a single
//! recency list:
//!
//! ```text
//!  front (most recently used)                 back (next victim)
//!    │                                                 │
//!    ▼                                                 ▼
//!  [ k7 ] ⇄ [ k2 ] ⇄ [ k9 ] ⇄ [ k4 ] ⇄ [ empty ] ⇄ [ empty ]
//!     ▲        ▲        ▲        ▲
//!     └────────┴────────┴────────┴──── key index: hash(K) -> slot id
//! ```
//!
//! - `get` moves the hit slot to the front.
//! - `set` of a new key reuses the back slot. If that slot is occupied its
//!   pair is evicted and reported; if it is empty nothing is evicted.
//! - `set` of a present key replaces the value in place, moves the slot to the
//!   front and reports the previous value as evicted.
//! - `remove` empties the slot and moves it to the back, so it is the next
//!   slot reused.
//! - `peek` reads without touching the order.
//!
//! Empty slots therefore always sit behind every occupied slot, and the back
//! slot is occupied only when the cache is full.
//!
//! Keys live only in their slot. The index is a `hashbrown::HashTable` of
//! slot ids that hashes with the cache's `BuildHasher` and compares lookups
//! against the key stored in the slot, so no key is ever cloned.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: O(1) for get, peek, set, remove, len
//! - **Space Complexity**: exactly `capacity` slots plus a key index sized so
//!   that it never grows; no allocation happens after construction
//!
//! # Thread Safety
//!
//! Every operation runs as one critical section under a single mutex owned by
//! the cache (`parking_lot::Mutex` with the `std` feature, a `spin::Mutex`
//! without it), so `LruCache` can be shared between threads directly (e.g.
//! behind an `Arc`). Lookups hand back owned clones; [`LruCache::get_with`]
//! and [`LruCache::peek_with`] give borrowed access scoped to a closure that
//! runs while the lock is held.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::ConfigError;
use crate::evicted::Evicted;
use crate::list::{SlotId, SlotList};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::traits::Cache;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use hashbrown::{DefaultHashBuilder, HashTable};
use tracing::{event, Level};

#[cfg(feature = "std")]
use parking_lot::Mutex;
#[cfg(not(feature = "std"))]
use spin::Mutex;

/// Key index capacity for a cache of `cap` slots.
///
/// A full cache replaces a key with remove-then-insert, which leaves
/// tombstones behind. Keeping the live entry count at or below half of the
/// table lets the table clean them up in place instead of reallocating.
#[inline]
fn index_capacity(cap: usize) -> usize {
    cap.saturating_mul(2)
}

/// Returns `true` if slot `id` holds a key equal to `key`.
#[inline]
fn slot_matches<K, V, Q>(list: &SlotList<K, V>, id: SlotId, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    list.entry(id)
        .is_some_and(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
}

/// Rehash callback for the index: the hash of the key stored in slot `id`.
#[inline]
fn slot_hash<K: Hash, V, S: BuildHasher>(
    list: &SlotList<K, V>,
    hash_builder: &S,
    id: SlotId,
) -> u64 {
    // Indexed slots are always occupied.
    list.entry(id).map_or(0, |(k, _)| hash_builder.hash_one(k))
}

/// Unsynchronized cache state: the slot pool, the key index and the hasher
/// both sides agree on.
///
/// Everything in here is only ever touched through the mutex in
/// [`LruCache`].
struct LruInner<K, V, S> {
    list: SlotList<K, V>,
    index: HashTable<SlotId>,
    hash_builder: S,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruInner<K, V, S> {
    fn with_hasher(cap: usize, hash_builder: S) -> Self {
        LruInner {
            list: SlotList::new(cap),
            index: HashTable::with_capacity(index_capacity(cap)),
            hash_builder,
            metrics: LruCacheMetrics::new(cap),
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let list = &self.list;
        self.index
            .find(hash, |&id| slot_matches(list, id, key))
            .copied()
    }

    fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.find(key) {
            Some(id) => {
                self.list.move_to_front(id);
                self.metrics.core.record_hit();
                self.list.entry(id).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.find(key)?;
        self.list.entry(id).map(|(_, v)| v)
    }

    fn set(&mut self, key: K, value: V) -> Option<Evicted<K, V>> {
        let hash = self.hash_builder.hash_one(&key);
        let list = &self.list;
        let present = self
            .index
            .find(hash, |&id| slot_matches(list, id, &key))
            .copied();
        if let Some(id) = present {
            let (_, slot_value) = self.list.entry_mut(id)?;
            let prior = mem::replace(slot_value, value);
            self.list.move_to_front(id);
            self.metrics.core.record_update();
            return Some(Evicted::new(key, prior));
        }

        let Some(id) = self.list.back() else {
            // No slots at all: nothing is ever retained.
            return Some(Evicted::new(key, value));
        };

        let victim_hash = self
            .list
            .entry(id)
            .map(|(k, _)| self.hash_builder.hash_one(k));

        let evicted = match victim_hash {
            Some(victim_hash) => {
                event!(
                    Level::TRACE,
                    capacity = self.list.slot_count(),
                    len = self.index.len(),
                    "evicted least recently used entry"
                );
                // Unindex before emptying the slot so the index never points
                // at an empty slot.
                if let Ok(entry) = self.index.find_entry(victim_hash, |&other| other == id) {
                    entry.remove();
                }
                self.metrics.core.record_eviction();
                self.list
                    .take(id)
                    .map(|(old_key, old_value)| Evicted::new(old_key, old_value))
            }
            None => None,
        };

        self.list.replace(id, key, value);
        let (list, hash_builder) = (&self.list, &self.hash_builder);
        self.index
            .insert_unique(hash, id, |&other| slot_hash(list, hash_builder, other));
        self.list.move_to_front(id);
        self.metrics.core.record_insertion();

        evicted
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let list = &self.list;
        let (id, _) = self
            .index
            .find_entry(hash, |&id| slot_matches(list, id, key))
            .ok()?
            .remove();
        let (_, value) = self.list.take(id)?;
        self.list.move_to_back(id);
        self.metrics.core.record_removal();
        Some(value)
    }

    fn victim(&self) -> Option<&K> {
        let id = self.list.back()?;
        self.list.entry(id).map(|(k, _)| k)
    }

    fn clear(&mut self) -> usize {
        let dropped = self.index.len();
        self.index.clear();
        self.list.clear();
        dropped
    }
}

/// A thread-safe, fixed-capacity Least Recently Used (LRU) cache.
///
/// All `capacity` slots are allocated by the constructor; afterwards no
/// operation allocates. When the cache is full, inserting a new key evicts
/// the least recently used pair and reports it.
///
/// # Examples
///
/// ```
/// use slot_lru::LruCache;
///
/// let cache = LruCache::new(2);
///
/// cache.set("apple", 1);
/// cache.set("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// // Adding beyond capacity evicts the least recently used item
/// let evicted = cache.set("cherry", 3).unwrap();
/// assert_eq!(evicted.key, "banana");
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(1));
/// assert_eq!(cache.get(&"cherry"), Some(3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    capacity: usize,
    inner: Mutex<LruInner<K, V, S>>,
}

impl<K: Hash + Eq, V> LruCache<K, V, DefaultHashBuilder> {
    /// Creates a cache with `capacity` preallocated slots and the default hasher.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`](crate::config::MAX_CAPACITY).
    /// Use [`LruCache::try_init`] to get an error instead.
    pub fn new(capacity: usize) -> Self {
        Self::init(LruCacheConfig::new(capacity), None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (see [`LruCacheConfig::validate`]).
    ///
    /// # Example
    ///
    /// ```
    /// use slot_lru::config::LruCacheConfig;
    /// use slot_lru::LruCache;
    ///
    /// let config = LruCacheConfig { capacity: 128 };
    /// let cache: LruCache<u64, String> = LruCache::init(config, None);
    /// assert_eq!(cache.capacity(), 128);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        match Self::try_init(config, hasher) {
            Ok(cache) => cache,
            Err(err) => panic!("invalid LRU cache configuration: {err}"),
        }
    }

    /// Creates a cache from a configuration, rejecting invalid configurations
    /// before anything is allocated.
    pub fn try_init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::try_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache with `capacity` slots and a custom hash builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`](crate::config::MAX_CAPACITY).
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        match Self::try_with_hasher(LruCacheConfig::new(capacity), hash_builder) {
            Ok(cache) => cache,
            Err(err) => panic!("invalid LRU cache configuration: {err}"),
        }
    }

    /// Fallible form of [`LruCache::with_hasher`] taking a full configuration.
    pub fn try_with_hasher(config: LruCacheConfig, hash_builder: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let capacity = config.capacity;
        let inner = LruInner::with_hasher(capacity, hash_builder);
        event!(Level::DEBUG, capacity, "lru cache created");

        Ok(LruCache {
            capacity,
            inner: Mutex::new(inner),
        })
    }

    /// Number of preallocated slots. Fixed for the lifetime of the cache.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().index.is_empty()
    }

    /// Returns `true` if `key` is present. Does not change recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().find(key).is_some()
    }

    /// Looks up `key`, marks it most recently used, and applies `f` to the
    /// value while the lock is held.
    ///
    /// Avoids cloning when only part of the value is needed. The lock is
    /// released when `f` returns or unwinds.
    ///
    /// # Deadlocks
    ///
    /// `f` must not call back into the same cache.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_lru::LruCache;
    ///
    /// let cache = LruCache::new(4);
    /// cache.set("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |s| s.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let mut inner = self.inner.lock();
        inner.get(key).map(f)
    }

    /// Like [`LruCache::get_with`] but leaves recency untouched.
    ///
    /// # Deadlocks
    ///
    /// `f` must not call back into the same cache.
    pub fn peek_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let inner = self.inner.lock();
        inner.peek(key).map(f)
    }

    /// Inserts or updates a pair.
    ///
    /// # Returns
    ///
    /// - `None` if a new key was stored in a free slot
    /// - `Some(evicted)` with the least recently used pair if the cache was full
    /// - `Some(evicted)` with `key` and its previous value if `key` was present
    /// - `Some(evicted)` with the supplied pair if the capacity is 0
    pub fn set(&self, key: K, value: V) -> Option<Evicted<K, V>> {
        if self.capacity == 0 {
            return Some(Evicted::new(key, value));
        }
        self.inner.lock().set(key, value)
    }

    /// Deletes `key` and returns its value.
    ///
    /// The freed slot becomes the next one reused, so removing never causes a
    /// later eviction of another key.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Drops every entry. Slots and index storage are kept for reuse.
    pub fn clear(&self) {
        let dropped = self.inner.lock().clear();
        event!(Level::DEBUG, dropped, "lru cache cleared");
    }

    /// Returns a copy of the counters recorded so far.
    pub fn snapshot_metrics(&self) -> LruCacheMetrics {
        self.inner.lock().metrics.clone()
    }
}

impl<K: Hash + Eq, V: Clone, S: BuildHasher> LruCache<K, V, S> {
    /// Returns a clone of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a clone of the value for `key` without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().peek(key).cloned()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Key the next insertion of a new key would evict.
    ///
    /// `None` while free slots remain, and always `None` for capacity 0.
    pub fn victim(&self) -> Option<K> {
        self.inner.lock().victim().cloned()
    }
}

impl<K: Hash + Eq, V: Clone, S: BuildHasher> Cache<K, V> for LruCache<K, V, S> {
    #[inline]
    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        LruCache::get(self, key)
    }

    #[inline]
    fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        LruCache::peek(self, key)
    }

    #[inline]
    fn set(&self, key: K, value: V) -> Option<Evicted<K, V>> {
        LruCache::set(self, key, value)
    }

    #[inline]
    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        LruCache::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_lock so formatting from inside a get_with closure cannot deadlock
        let len = self.inner.try_lock().map(|inner| inner.index.len());
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    /// Walks the recency list front to back, returning the occupied keys.
    fn keys_by_recency<K: Clone + Hash + Eq, V, S: BuildHasher>(
        cache: &LruCache<K, V, S>,
    ) -> Vec<K> {
        let inner = cache.inner.lock();
        inner
            .list
            .order_ids()
            .into_iter()
            .filter_map(|id| inner.list.entry(id).map(|(k, _)| k.clone()))
            .collect()
    }

    /// Index entries and occupied slots must agree one to one, every stored
    /// key must be found through the index, and empty slots must all sit
    /// behind the occupied ones.
    fn assert_consistent<K: Hash + Eq, V, S: BuildHasher>(cache: &LruCache<K, V, S>) {
        let inner = cache.inner.lock();
        for id in inner.index.iter() {
            let (key, _) = inner.list.entry(*id).expect("indexed slot is empty");
            assert_eq!(inner.find(key), Some(*id));
        }
        let order = inner.list.order_ids();
        assert_eq!(order.len(), cache.capacity());
        let occupied = inner.index.len();
        for (pos, id) in order.iter().enumerate() {
            assert_eq!(
                inner.list.entry(*id).is_some(),
                pos < occupied,
                "slot {} at position {pos}",
                id.index()
            );
        }
    }

    #[test]
    fn test_lru_get_set() {
        let cache = LruCache::new(2);
        assert_eq!(cache.set("apple", 1), None);
        assert_eq!(cache.set("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(1));
        assert_eq!(cache.get(&"banana"), Some(2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.set("apple", 3), Some(Evicted::new("apple", 1)));
        assert_eq!(cache.get(&"apple"), Some(3));
        assert_eq!(cache.set("cherry", 4), Some(Evicted::new("banana", 2)));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(3));
        assert_eq!(cache.get(&"cherry"), Some(4));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_recency_order() {
        let cache = LruCache::new(4);
        for k in 1..=4 {
            cache.set(k, k);
        }
        assert_eq!(keys_by_recency(&cache), [4, 3, 2, 1]);
        cache.get(&2);
        assert_eq!(keys_by_recency(&cache), [2, 4, 3, 1]);
        cache.peek(&1);
        assert_eq!(keys_by_recency(&cache), [2, 4, 3, 1]);
        cache.set(3, 30);
        assert_eq!(keys_by_recency(&cache), [3, 2, 4, 1]);
        cache.remove(&4);
        assert_eq!(keys_by_recency(&cache), [3, 2, 1]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_remove() {
        let cache = LruCache::new(2);
        cache.set("apple", 1);
        cache.set("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);
        assert_eq!(cache.len(), 1);
        // The freed slot is reused, so nothing is evicted.
        assert_eq!(cache.set("cherry", 3), None);
        assert_eq!(cache.get(&"banana"), Some(2));
        assert_eq!(cache.get(&"cherry"), Some(3));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_remove_slot_is_reused_first() {
        let cache = LruCache::new(3);
        cache.set(1, 1);
        cache.set(2, 2);
        cache.set(3, 3);
        assert_eq!(cache.remove(&3), Some(3));
        assert_eq!(cache.victim(), None);
        assert_eq!(cache.set(4, 4), None);
        assert_eq!(cache.victim(), Some(1));
        assert_eq!(cache.set(5, 5), Some(Evicted::new(1, 1)));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_zero_capacity() {
        let cache: LruCache<i32, i32> = LruCache::new(0);
        assert_eq!(cache.capacity(), 0);
        assert_eq!(cache.set(5, 5), Some(Evicted::new(5, 5)));
        assert_eq!(cache.get(&5), None);
        assert_eq!(cache.peek(&5), None);
        assert_eq!(cache.remove(&5), None);
        assert_eq!(cache.victim(), None);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_zero_capacity_inner_retains_nothing() {
        let mut inner: LruInner<i32, i32, DefaultHashBuilder> =
            LruInner::with_hasher(0, DefaultHashBuilder::default());
        assert_eq!(inner.set(1, 2), Some(Evicted::new(1, 2)));
        assert_eq!(inner.index.len(), 0);
    }

    #[test]
    fn test_lru_default_key_and_value() {
        let cache: LruCache<String, i32> = LruCache::new(1);
        assert_eq!(cache.set(String::new(), 0), None);
        assert_eq!(cache.get(""), Some(0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.victim(), Some(String::new()));
    }

    #[test]
    fn test_lru_string_keys_borrowed_lookup() {
        let cache = LruCache::new(2);
        cache.set("apple".to_string(), 1);
        cache.set("banana".to_string(), 2);
        assert_eq!(cache.get("apple"), Some(1));
        assert_eq!(cache.peek("banana"), Some(2));
        assert!(cache.contains_key("apple"));
        assert!(!cache.contains_key("cherry"));
        assert_eq!(cache.remove("apple"), Some(1));
    }

    #[test]
    fn test_lru_contains_key_does_not_promote() {
        let cache = LruCache::new(2);
        cache.set(1, 1);
        cache.set(2, 2);
        assert!(cache.contains_key(&1));
        assert_eq!(cache.set(3, 3), Some(Evicted::new(1, 1)));
    }

    #[test]
    fn test_lru_get_with_and_peek_with() {
        let cache = LruCache::new(2);
        cache.set("a", String::from("alpha"));
        cache.set("b", String::from("beta"));
        assert_eq!(cache.peek_with(&"a", |s| s.len()), Some(5));
        assert_eq!(cache.victim(), Some("a"));
        assert_eq!(cache.get_with(&"a", |s| s.len()), Some(5));
        assert_eq!(cache.victim(), Some("b"));
        assert_eq!(cache.get_with(&"zzz", |s| s.len()), None);
    }

    #[test]
    fn test_lru_victim() {
        let cache = LruCache::new(2);
        assert_eq!(cache.victim(), None);
        cache.set(1, 1);
        assert_eq!(cache.victim(), None);
        cache.set(2, 2);
        assert_eq!(cache.victim(), Some(1));
        cache.get(&1);
        assert_eq!(cache.victim(), Some(2));
        assert_eq!(cache.set(3, 3), Some(Evicted::new(2, 2)));
        assert_eq!(cache.victim(), Some(1));
    }

    #[test]
    fn test_lru_clear() {
        let cache = LruCache::new(2);
        cache.set("apple", 1);
        cache.set("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.victim(), None);
        assert_eq!(cache.set("cherry", 3), None);
        assert_eq!(cache.get(&"cherry"), Some(3));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_try_init_rejects_oversized_capacity() {
        let config = LruCacheConfig::new(crate::config::MAX_CAPACITY + 1);
        let err = LruCache::<u8, u8>::try_init(config, None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::CapacityTooLarge {
                requested: crate::config::MAX_CAPACITY + 1,
                max: crate::config::MAX_CAPACITY,
            }
        );
    }

    #[test]
    #[should_panic(expected = "invalid LRU cache configuration")]
    fn test_lru_new_panics_on_oversized_capacity() {
        let _ = LruCache::<u8, u8>::new(crate::config::MAX_CAPACITY + 1);
    }

    #[test]
    fn test_lru_with_custom_hasher() {
        let cache: LruCache<u32, u32, std::collections::hash_map::RandomState> =
            LruCache::with_hasher(3, std::collections::hash_map::RandomState::new());
        cache.set(1, 10);
        assert_eq!(cache.get(&1), Some(10));
    }

    #[test]
    fn test_lru_metrics() {
        let cache = LruCache::new(2);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &0.0);
        assert_eq!(metrics.get("capacity").unwrap(), &2.0);

        cache.set("apple", 1);
        cache.set("banana", 2);
        cache.get(&"apple");
        cache.get(&"missing");
        cache.peek(&"banana");
        cache.set("apple", 10);
        cache.set("cherry", 3);
        cache.remove(&"cherry");

        let snapshot = cache.snapshot_metrics();
        assert_eq!(snapshot.core.requests, 2);
        assert_eq!(snapshot.core.cache_hits, 1);
        assert_eq!(snapshot.core.cache_misses(), 1);
        assert_eq!(snapshot.core.insertions, 3);
        assert_eq!(snapshot.core.updates, 1);
        assert_eq!(snapshot.core.evictions, 1);
        assert_eq!(snapshot.core.removals, 1);
        assert_eq!(cache.metrics().get("evictions").unwrap(), &1.0);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_debug_does_not_deadlock_inside_closure() {
        let cache = LruCache::new(1);
        cache.set(1, 1);
        let rendered = cache.get_with(&1, |_| std::format!("{cache:?}")).unwrap();
        assert!(rendered.contains("capacity: 1"));
        assert!(rendered.contains("len: None"));
        assert!(std::format!("{cache:?}").contains("len: Some(1)"));
    }

    #[test]
    fn test_lru_lock_released_after_panicking_closure() {
        let cache = LruCache::new(1);
        cache.set(1, 1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.get_with(&1, |_| -> () { panic!("boom") });
        }));
        assert!(result.is_err());
        assert_eq!(cache.get(&1), Some(1));
    }

    #[test]
    fn test_lru_concurrent_access() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(LruCache::new(100));
        let num_threads = 4;
        let ops_per_thread = 100;

        let mut handles: Vec<thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    cache.set(key, t * 1000 + i);
                }
            }));
        }

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    let _ = cache.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 100);
        assert_consistent(&cache);
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Fragile(u32);

    std::thread_local! {
        static FAIL_HASH: core::cell::Cell<Option<u32>> = const { core::cell::Cell::new(None) };
    }

    impl Hash for Fragile {
        fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
            if FAIL_HASH.with(|f| f.get()) == Some(self.0) {
                panic!("hash failure");
            }
            self.0.hash(state);
        }
    }

    #[test]
    fn test_lru_panicking_hash_during_eviction_keeps_victim() {
        let cache = LruCache::new(1);
        cache.set(Fragile(1), 10);

        FAIL_HASH.with(|f| f.set(Some(1)));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.set(Fragile(2), 20);
        }));
        FAIL_HASH.with(|f| f.set(None));

        assert!(result.is_err());
        assert_consistent(&cache);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&Fragile(1)), Some(10));
        assert_eq!(cache.get(&Fragile(2)), None);
        assert_eq!(cache.set(Fragile(2), 20), Some(Evicted::new(Fragile(1), 10)));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lru_accepts_keys_without_clone() {
        #[derive(Debug, PartialEq, Eq, Hash)]
        struct Unique(u32);

        let cache = LruCache::new(2);
        assert_eq!(cache.set(Unique(1), "a"), None);
        assert_eq!(cache.set(Unique(2), "b"), None);
        assert_eq!(cache.get(&Unique(1)), Some("a"));
        assert_eq!(cache.set(Unique(3), "c"), Some(Evicted::new(Unique(2), "b")));
        assert_eq!(cache.peek(&Unique(3)), Some("c"));
        assert_eq!(cache.remove(&Unique(1)), Some("a"));
        assert_consistent(&cache);
    }
}
