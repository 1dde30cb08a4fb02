//! # LFU (Least Frequently Used) Cache Implementation
//!
//! A fixed-capacity cache that evicts the least frequently used entry when
//! full. Lookup, insertion and eviction are all O(1): entries live in a
//! pre-reserved [`NodePool`], are grouped into per-frequency intrusive lists
//! ([`FrequencyBuckets`]), and are found through a [`KeyIndex`]. A running
//! `min_freq` points straight at the bucket holding the next victim.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   index: KeyIndex<K>              pool: NodePool<K, V>                   │
//!   │   ┌─────────┬────────┐            ┌──────┬──────────────────────────┐    │
//!   │   │ "a"     │ s0     │──────────► │ s0   │ freq:3 key:"a" value:..  │    │
//!   │   │ "b"     │ s1     │──────────► │ s1   │ freq:1 key:"b" value:..  │    │
//!   │   │ "c"     │ s2     │──────────► │ s2   │ freq:1 key:"c" value:..  │    │
//!   │   └─────────┴────────┘            └──────┴──────────────────────────┘    │
//!   │                                                                          │
//!   │   buckets: FrequencyBuckets                                              │
//!   │     freq=1: head ──► [s2] ◄──► [s1] ◄── tail   ← min_freq = 1            │
//!   │     freq=3: head ──► [s0] ◄── tail                                       │
//!   │                                                                          │
//!   │   capacity: usize  (fixed at construction)                               │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction Flow
//!
//! ```text
//!   put(key, value)
//!        │
//!        ▼
//!   Key already present? ── YES ──► overwrite value, bump frequency, done
//!        │                          (never evicts)
//!        NO
//!        ▼
//!   Pool full? ── YES ──► evict tail of bucket[min_freq]
//!        │                (lowest frequency, least recently touched)
//!        ▼
//!   allocate node(freq = 1) → head of bucket[1] → index → min_freq = 1
//! ```
//!
//! ## Frequency Bump
//!
//! ```text
//!   get(&key) / put(existing key)
//!     1. unlink slot from bucket[f]           (drops the bucket if emptied)
//!     2. push slot to head of bucket[f + 1]
//!     3. if bucket[f] emptied and f == min_freq → min_freq = f + 1
//! ```
//!
//! ## Lookup Variants
//!
//! | Method            | Hit             | Miss                         |
//! |-------------------|-----------------|------------------------------|
//! | `get(&k)`         | cloned value    | `V::default()`               |
//! | `get_or(&k, v)`   | cloned value    | the supplied fallback        |
//! | `try_get(&k)`     | `Ok(&V)`        | `Err(Error::KeyNotFound)`    |
//! | `get_ref(&k)`     | `Some(&V)`      | `None`                       |
//!
//! All four share one lookup-and-bump path; a miss never mutates the cache.
//! `contains`, `frequency` and `peek_lfu` are pure reads.
//!
//! ## Thread Safety
//!
//! `LfuCache` holds no locks. Every mutating method takes `&mut self`, so
//! sharing across threads means wrapping it in a `Mutex`.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache: LfuCache<u32, &str> = LfuCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//!
//! assert_eq!(cache.get(&1), "one"); // freq(1) = 2
//! cache.put(3, "three");             // evicts 2 (freq 1)
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.get_or(&2, "gone"), "gone");
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::ds::frequency_buckets::{FrequencyBuckets, default_bucket_prealloc};
use crate::ds::key_index::KeyIndex;
use crate::ds::node_pool::{Node, NodePool, SlotId};
use crate::error::{ConfigError, Error, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider,
};

/// Fixed-capacity LFU cache with recency tie-breaking.
///
/// See module-level documentation for details.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    pool: NodePool<K, V>,
    buckets: FrequencyBuckets,
    index: KeyIndex<K>,
    /// Lowest frequency with a live bucket; 0 while empty.
    min_freq: u64,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible constructor; rejects a zero capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u64, u64>::try_new(16).is_ok());
    /// assert!(LfuCache::<u64, u64>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_bucket_hint(capacity, default_bucket_prealloc(capacity))
    }

    /// Fallible constructor that also reserves room for `bucket_hint`
    /// distinct frequencies.
    pub fn try_with_bucket_hint(capacity: usize, bucket_hint: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            warn!("rejected LFU cache with zero capacity");
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(Self {
            pool: NodePool::with_capacity(capacity),
            buckets: FrequencyBuckets::with_capacity(bucket_hint),
            index: KeyIndex::with_capacity(capacity),
            min_freq: 0,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        })
    }

    // -- lookups ----------------------------------------------------------

    /// Returns a clone of the value for `key`, bumping its frequency, or
    /// `V::default()` if the key is absent.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone + Default,
    {
        self.get_ref(key).cloned().unwrap_or_default()
    }

    /// Returns the value for `key`, bumping its frequency, or
    /// [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::error::Error;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.put("timeout", 30);
    /// assert_eq!(cache.try_get("timeout"), Ok(&30));
    /// assert_eq!(cache.try_get("retries"), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<Q>(&mut self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(id) = self.lookup(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_strict_miss();
            return Err(Error::KeyNotFound);
        };
        self.pool.get(id).map(Node::value).ok_or(Error::KeyNotFound)
    }

    /// Returns a clone of the value for `key`, bumping its frequency, or
    /// `fallback` if the key is absent.
    pub fn get_or<Q>(&mut self, key: &Q, fallback: V) -> V
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        match self.lookup(key) {
            Some(id) => self.pool.get(id).map_or(fallback, |node| node.value.clone()),
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_fallback_miss();
                fallback
            },
        }
    }

    /// Returns a reference to the value for `key`, bumping its frequency.
    #[inline]
    pub fn get_ref<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.lookup(key)?;
        self.pool.get(id).map(Node::value)
    }

    /// Returns `true` if `key` is cached. Does not touch its frequency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let found = self.index.contains(key);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_contains_call();
            if found {
                self.metrics.record_contains_found();
            }
        }
        found
    }

    /// Current access count for `key`, without touching it.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.find(key)?;
        self.pool.get(id).map(Node::freq)
    }

    /// The entry the next eviction would remove, without touching it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let id = self.buckets.tail(self.min_freq)?;
        self.pool.get(id).map(|node| (&node.key, &node.value))
    }

    /// Lowest frequency among live entries, `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    // -- mutation ---------------------------------------------------------

    /// Inserts or updates `key`.
    ///
    /// Updating an existing key overwrites the value in place, bumps its
    /// frequency and returns the previous value; it never evicts. Inserting a
    /// new key into a full cache first evicts the least frequently used
    /// entry, least recently touched among ties.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(id) = self.index.find(&key) {
            let previous = self
                .pool
                .get_mut(id)
                .map(|node| std::mem::replace(&mut node.value, value));
            self.bump(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            trace!(slot = id.index(), "updated cached value");
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.pool.is_full() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            self.evict();
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        let id = self.pool.allocate(key.clone(), value, 1);
        self.buckets.push_front(&mut self.pool, 1, id);
        self.index.insert(key, id);
        self.min_freq = 1;
        trace!(slot = id.index(), len = self.pool.len(), "inserted new entry");
        None
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        let dropped = self.pool.len();
        self.pool.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
        debug!(dropped, "cleared LFU cache");
    }

    // -- size -------------------------------------------------------------

    #[inline]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Iterates live entries in slot order (not eviction order).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.pool.iter().map(|(_, node)| (&node.key, &node.value))
    }

    // -- internals --------------------------------------------------------

    /// Finds `key` and bumps its frequency. The single path behind every
    /// lookup variant.
    #[inline]
    fn lookup<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let found = self.index.find(key);
        if let Some(id) = found {
            self.bump(id);
        }
        #[cfg(feature = "metrics")]
        if found.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        found
    }

    /// Moves `id` from bucket `f` to the head of bucket `f + 1`.
    ///
    /// At `u64::MAX` the frequency saturates and the node only moves to the
    /// head of its current bucket.
    #[inline]
    fn bump(&mut self, id: SlotId) {
        let Some(freq) = self.pool.get(id).map(Node::freq) else {
            return;
        };
        let next = freq.saturating_add(1);
        let emptied = self.buckets.unlink(&mut self.pool, freq, id);
        self.buckets.push_front(&mut self.pool, next, id);
        if emptied && self.min_freq == freq {
            self.min_freq = next;
        }
    }

    /// Removes the tail of the minimum-frequency bucket.
    ///
    /// Leaves `min_freq` stale when that bucket empties; the insertion that
    /// always follows resets it to 1.
    fn evict(&mut self) {
        let freq = self.min_freq;
        let Some(id) = self.buckets.tail(freq) else {
            panic!("minimum-frequency bucket {freq} is empty in a full cache");
        };
        self.buckets.unlink(&mut self.pool, freq, id);
        let node = self.pool.release(id).expect("lfu victim slot missing");
        self.index.erase(&node.key);
        debug!(
            freq,
            slot = id.index(),
            len = self.pool.len(),
            "evicted least frequently used entry"
        );
    }

    // -- inspection -------------------------------------------------------

    /// Keys grouped by frequency, ascending; each bucket lists most recently
    /// touched first.
    pub fn buckets(&self) -> Vec<(u64, Vec<&K>)> {
        self.buckets
            .frequencies()
            .into_iter()
            .map(|freq| {
                let keys = self
                    .buckets
                    .iter(&self.pool, freq)
                    .filter_map(|id| self.pool.get(id).map(Node::key))
                    .collect();
                (freq, keys)
            })
            .collect()
    }

    /// Printable view of the bucket layout, for diagnostics.
    pub fn debug_state(&self) -> CacheState<'_, K, V> {
        CacheState { cache: self }
    }

    /// Walks every structure and checks they agree with each other.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.pool.len();
        if len > self.capacity() {
            return Err(InvariantError::new(format!(
                "len {len} exceeds capacity {}",
                self.capacity()
            )));
        }
        if self.index.len() != len {
            return Err(InvariantError::new(format!(
                "index has {} keys but pool has {len} live slots",
                self.index.len()
            )));
        }
        if len == 0 {
            if self.min_freq != 0 {
                return Err(InvariantError::new(format!(
                    "empty cache has min_freq {}",
                    self.min_freq
                )));
            }
            if self.buckets.active_buckets() != 0 {
                return Err(InvariantError::new("empty cache has live buckets"));
            }
            return Ok(());
        }

        let freqs = self.buckets.frequencies();
        if freqs.first() != Some(&self.min_freq) {
            return Err(InvariantError::new(format!(
                "min_freq {} does not match lowest bucket {:?}",
                self.min_freq,
                freqs.first()
            )));
        }

        let mut linked = 0usize;
        for freq in freqs {
            let bucket = self
                .buckets
                .get(freq)
                .ok_or_else(|| InvariantError::new(format!("bucket {freq} vanished")))?;
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("bucket {freq} is empty")));
            }

            let mut prev = None;
            let mut count = 0usize;
            let mut current = bucket.head();
            while let Some(id) = current {
                let node = self.pool.get(id).ok_or_else(|| {
                    InvariantError::new(format!("bucket {freq} links free slot {}", id.index()))
                })?;
                if node.freq != freq {
                    return Err(InvariantError::new(format!(
                        "slot {} has freq {} inside bucket {freq}",
                        id.index(),
                        node.freq
                    )));
                }
                if node.prev != prev {
                    return Err(InvariantError::new(format!(
                        "slot {} has a broken prev link",
                        id.index()
                    )));
                }
                if self.index.find(&node.key) != Some(id) {
                    return Err(InvariantError::new(format!(
                        "index does not map slot {} back to itself",
                        id.index()
                    )));
                }
                prev = Some(id);
                current = node.next;
                count += 1;
                if count > len {
                    return Err(InvariantError::new(format!("bucket {freq} has a cycle")));
                }
            }
            if bucket.tail() != prev {
                return Err(InvariantError::new(format!("bucket {freq} tail is stale")));
            }
            if bucket.len() != count {
                return Err(InvariantError::new(format!(
                    "bucket {freq} counts {} but links {count}",
                    bucket.len()
                )));
            }
            linked += count;
        }

        if linked != len {
            return Err(InvariantError::new(format!(
                "buckets link {linked} slots but pool has {len}"
            )));
        }
        Ok(())
    }
}

/// Display adapter returned by [`LfuCache::debug_state`].
pub struct CacheState<'a, K, V> {
    cache: &'a LfuCache<K, V>,
}

impl<K, V> fmt::Display for CacheState<'_, K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache;
        writeln!(
            f,
            "Cache State (size={}, capacity={}):",
            cache.len(),
            cache.capacity()
        )?;
        for freq in cache.buckets.frequencies() {
            write!(f, "  Freq {freq}:")?;
            for id in cache.buckets.iter(&cache.pool, freq) {
                if let Some(node) = cache.pool.get(id) {
                    write!(f, " ({},{})", node.key, node.value)?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  Min frequency: {}", cache.min_freq)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            strict_misses: self.metrics.strict_misses,
            fallback_misses: self.metrics.fallback_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            contains_calls: self.metrics.contains_calls.get(),
            contains_found: self.metrics.contains_found.get(),
            cache_len: self.len(),
            capacity: self.capacity(),
            min_freq: self.min_freq,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}
