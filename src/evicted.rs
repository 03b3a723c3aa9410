//! Eviction result type.
//!
//! Operations that can push a pair out of a cache report it as
//! `Option<Evicted<K, V>>`: `None` means nothing left the cache.

/// A key-value pair that left the cache as a side effect of an operation.
///
/// Produced by `set` in three situations:
///
/// - the cache was full and the least recently used pair was displaced,
/// - the key was already present and this is its previous value,
/// - the cache retains nothing (capacity 0, or [`NopCache`](crate::NopCache))
///   and the supplied pair is handed straight back.
///
/// # Examples
///
/// ```
/// use slot_lru::{Evicted, LruCache};
///
/// let cache = LruCache::new(1);
/// assert_eq!(cache.set("a", 1), None);
///
/// let evicted = cache.set("b", 2).unwrap();
/// assert_eq!(evicted, Evicted::new("a", 1));
/// assert_eq!(evicted.into_pair(), ("a", 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evicted<K, V> {
    /// Key of the pair that left the cache.
    pub key: K,
    /// Value that left the cache.
    pub value: V,
}

impl<K, V> Evicted<K, V> {
    /// Creates an eviction record for `key` and `value`.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Evicted { key, value }
    }

    /// Returns a reference to the evicted key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns a reference to the evicted value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Splits the record into its key and value.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Evicted<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Evicted { key, value }
    }
}

impl<K, V> From<Evicted<K, V>> for (K, V) {
    #[inline]
    fn from(evicted: Evicted<K, V>) -> Self {
        evicted.into_pair()
    }
}
