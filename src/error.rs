//! Error types.
//!
//! Lookups never fail: a missing key is `None`. The only error in the crate
//! is a configuration error, raised while constructing a cache and before any
//! storage is allocated.

use thiserror::Error;

/// Returned when a cache configuration cannot be honoured.
///
/// # Example
///
/// ```
/// use slot_lru::config::{LruCacheConfig, MAX_CAPACITY};
/// use slot_lru::{ConfigError, LruCache};
///
/// let config = LruCacheConfig::new(MAX_CAPACITY + 1);
/// let err = LruCache::<u64, u64>::try_init(config, None).unwrap_err();
/// assert!(matches!(err, ConfigError::CapacityTooLarge { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested capacity exceeds the number of slots the pool can address.
    #[error("capacity {requested} exceeds the maximum of {max} slots")]
    CapacityTooLarge {
        /// Capacity that was asked for.
        requested: usize,
        /// Largest supported capacity.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_names_both_numbers() {
        let err = ConfigError::CapacityTooLarge {
            requested: 10,
            max: 5,
        };
        assert_eq!(err.to_string(), "capacity 10 exceeds the maximum of 5 slots");
    }
}
