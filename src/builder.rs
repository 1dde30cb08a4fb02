//! Builder for [`LfuCache`].
//!
//! Capacity is the only required setting. The bucket hint pre-sizes the
//! frequency bucket map for workloads that spread keys over many distinct
//! access counts; it never changes eviction behavior.
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::LfuCacheBuilder;
//!
//! let mut cache = LfuCacheBuilder::new(100)
//!     .bucket_hint(64)
//!     .build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), "hello");
//! ```

use std::hash::Hash;

use crate::ds::frequency_buckets::default_bucket_prealloc;
use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;

/// Builder for creating [`LfuCache`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheBuilder {
    capacity: usize,
    bucket_hint: Option<usize>,
}

impl LfuCacheBuilder {
    /// Create a new builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bucket_hint: None,
        }
    }

    /// Number of distinct frequencies to reserve room for.
    ///
    /// Defaults to `max(16, capacity / 10)`.
    pub fn bucket_hint(mut self, buckets: usize) -> Self {
        self.bucket_hint = Some(buckets);
        self
    }

    /// Build the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build the cache, rejecting invalid parameters.
    pub fn try_build<K, V>(self) -> Result<LfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let hint = self
            .bucket_hint
            .unwrap_or_else(|| default_bucket_prealloc(self.capacity));
        LfuCache::try_with_bucket_hint(self.capacity, hint)
    }
}
