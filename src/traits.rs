//! The operation set shared by every cache in this crate.
//!
//! Code written against [`Cache`] works unchanged whether it is handed a real
//! [`LruCache`](crate::LruCache) or a [`NopCache`](crate::NopCache), which is
//! how caching is switched off without touching call sites.
//!
//! ```
//! use slot_lru::{Cache, LruCache, NopCache};
//!
//! fn lookup_or_compute<C: Cache<u64, u64>>(cache: &C, n: u64) -> u64 {
//!     if let Some(v) = cache.get(&n) {
//!         return v;
//!     }
//!     let v = n * n;
//!     cache.set(n, v);
//!     v
//! }
//!
//! let cache = LruCache::new(16);
//! assert_eq!(lookup_or_compute(&cache, 7), 49);
//! assert_eq!(cache.len(), 1);
//!
//! let disabled = NopCache::new();
//! assert_eq!(lookup_or_compute(&disabled, 7), 49);
//! assert_eq!(disabled.len(), 0);
//! ```

use crate::evicted::Evicted;
use core::borrow::Borrow;
use core::hash::Hash;

/// Get, Set, Peek, Remove and Len, uniform across cache variants.
///
/// Every method takes `&self`: implementations synchronize internally, so a
/// cache can be shared between threads behind an `Arc` or a plain reference.
/// Values are returned as owned copies, never as references into the cache.
pub trait Cache<K, V> {
    /// Looks up `key`, marking it as most recently used on a hit.
    ///
    /// Never creates an entry.
    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Looks up `key` without changing its recency.
    fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Inserts or updates `key`, reporting the pair that left the cache, if any.
    ///
    /// Updating a present key reports its previous value as evicted.
    fn set(&self, key: K, value: V) -> Option<Evicted<K, V>>;

    /// Deletes `key`, returning its value if it was present.
    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
