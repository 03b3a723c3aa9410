#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Choosing a Cache
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Which Cache Should I Use?                    │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  Do you want results memoized?                                   │
//! │                                                                  │
//! │     Yes ──▶ LruCache::new(capacity)                              │
//! │              fixed slots, strict LRU eviction, one lock          │
//! │                                                                  │
//! │     No  ──▶ NopCache::new()                                      │
//! │              same Cache trait, stores nothing                    │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LRU (Least Recently Used)
//!
//! ```rust
//! use slot_lru::{Evicted, LruCache};
//!
//! let cache = LruCache::new(2);
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");                  // "a" is now most recently used
//! assert_eq!(cache.victim(), Some("b"));
//! assert_eq!(cache.set("c", 3), Some(Evicted::new("b", 2)));
//! ```
//!
//! ## Updates Are Reported
//!
//! Overwriting a present key hands back its previous value:
//!
//! ```rust
//! use slot_lru::{Evicted, LruCache};
//!
//! let cache = LruCache::new(4);
//! cache.set("k", 1);
//! assert_eq!(cache.set("k", 2), Some(Evicted::new("k", 1)));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the LRU engine
//! - [`nop`]: the no-op stand-in
//! - [`traits`]: the [`Cache`] capability trait
//! - [`evicted`]: the [`Evicted`] result type
//! - [`config`]: configuration structures
//! - [`error`]: configuration errors
//! - [`metrics`]: counters and reporting

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

/// Fixed-size, index-linked slot pool.
///
/// Internal infrastructure for [`LruCache`]; not part of the public API.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Configuration error types.
pub mod error;

/// The pair reported when something leaves a cache.
pub mod evicted;

/// The capability trait every cache implements.
pub mod traits;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-capacity, internally synchronized cache that evicts the
/// least recently used entry when a new key arrives and every slot is taken.
pub mod lru;

/// No-op cache implementation.
pub mod nop;

/// Cache metrics system.
///
/// Counters recorded by each cache and reported through a common trait.
pub mod metrics;

pub use config::LruCacheConfig;
pub use error::ConfigError;
pub use evicted::Evicted;
pub use lru::LruCache;
pub use metrics::CacheMetrics;
pub use nop::NopCache;
pub use traits::Cache;
