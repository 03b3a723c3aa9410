//! A cache that stores nothing.
//!
//! [`NopCache`] implements [`Cache`] with zero retained state, so caching can
//! be switched off by swapping the type while every call site stays the same.
//! Every `set` behaves as if the pair were accepted and immediately evicted.

extern crate alloc;

use crate::evicted::Evicted;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::traits::Cache;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;

/// Cache stand-in that never retains anything.
///
/// # Examples
///
/// ```
/// use slot_lru::{Evicted, NopCache};
///
/// let cache: NopCache<&str, i32> = NopCache::new();
/// assert_eq!(cache.set("a", 1), Some(Evicted::new("a", 1)));
/// assert_eq!(cache.get(&"a"), None);
/// assert_eq!(cache.len(), 0);
/// ```
pub struct NopCache<K, V> {
    // fn() -> (K, V) keeps the type Send + Sync and covariant without owning K or V.
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> NopCache<K, V> {
    /// Creates a no-op cache.
    #[inline]
    pub const fn new() -> Self {
        NopCache {
            _marker: PhantomData,
        }
    }

    /// Always `None`.
    #[inline]
    pub fn get<Q>(&self, _key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        None
    }

    /// Always `None`.
    #[inline]
    pub fn peek<Q>(&self, _key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        None
    }

    /// Hands the pair straight back as evicted.
    #[inline]
    pub fn set(&self, key: K, value: V) -> Option<Evicted<K, V>> {
        Some(Evicted::new(key, value))
    }

    /// Always `None`.
    #[inline]
    pub fn remove<Q>(&self, _key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        None
    }

    /// Always 0.
    #[inline]
    pub fn len(&self) -> usize {
        0
    }

    /// Always `true`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        true
    }
}

impl<K, V> Cache<K, V> for NopCache<K, V> {
    #[inline]
    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        NopCache::get(self, key)
    }

    #[inline]
    fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        NopCache::peek(self, key)
    }

    #[inline]
    fn set(&self, key: K, value: V) -> Option<Evicted<K, V>> {
        NopCache::set(self, key, value)
    }

    #[inline]
    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        NopCache::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        0
    }
}

impl<K, V> CacheMetrics for NopCache<K, V> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        CoreCacheMetrics::new().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "NOP"
    }
}

impl<K, V> Default for NopCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for NopCache<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NopCache<K, V> {}

impl<K, V> fmt::Debug for NopCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NopCache")
    }
}
