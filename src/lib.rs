//! lfukit: a fixed-capacity LFU cache with O(1) get, put and eviction.
//!
//! Entries live in a pre-reserved node pool, grouped into per-frequency
//! intrusive lists and found through a key index. Among entries with the
//! lowest access count, the least recently touched one is evicted first.
//!
//! ```
//! use lfukit::prelude::*;
//!
//! let mut cache: LfuCache<u64, String> = LfuCache::new(2);
//! cache.put(1, "one".to_string());
//! cache.put(2, "two".to_string());
//! cache.get(&1);
//! cache.put(3, "three".to_string());
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.try_get(&2), Err(Error::KeyNotFound));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
