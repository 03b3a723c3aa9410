//! Cache Configuration
//!
//! Configuration is a plain struct with public fields:
//!
//! - **Simple**: create the struct with every field set
//! - **Checked once**: [`LruCacheConfig::validate`] runs when a cache is built
//!
//! # Sizing
//!
//! `capacity` is the exact number of slots the cache preallocates. It is
//! fixed for the lifetime of the cache; nothing grows or shrinks afterwards.
//!
//! ```text
//! Total Memory ≈ capacity × (size_of::<(K, V)>() + slot links + index entry)
//! ```
//!
//! A capacity of `0` is valid and produces a cache that retains nothing:
//! every `set` hands its input straight back as evicted.
//!
//! # Examples
//!
//! ```
//! use slot_lru::config::LruCacheConfig;
//! use slot_lru::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.capacity(), 1000);
//! ```

use crate::error::ConfigError;
use crate::list::MAX_SLOTS;
use core::fmt;

/// Largest capacity an [`LruCache`](crate::LruCache) supports.
pub const MAX_CAPACITY: usize = MAX_SLOTS;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: number of slots to preallocate. Must not exceed
///   [`MAX_CAPACITY`].
///
/// # Examples
///
/// ```
/// use slot_lru::config::LruCacheConfig;
/// use slot_lru::LruCache;
///
/// let config = LruCacheConfig::new(500);
/// let cache: LruCache<&str, i32> = LruCache::init(config, None);
/// assert!(cache.is_empty());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Creates a configuration for `capacity` slots.
    #[inline]
    pub const fn new(capacity: usize) -> Self {
        LruCacheConfig { capacity }
    }

    /// Checks the configuration without allocating anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.capacity,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
