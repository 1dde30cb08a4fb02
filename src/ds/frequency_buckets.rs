//! Frequency buckets for O(1) LFU tracking.
//!
//! Maps each live frequency to an intrusive doubly-linked list of pool slots.
//! The list nodes are the [`Node`](crate::ds::node_pool::Node)s themselves:
//! each node carries its own `prev`/`next` [`SlotId`] links, so linking and
//! unlinking never allocate.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: FxHashMap<u64, Bucket>          pool: NodePool<K, V>
//!
//!   freq=1: head ──► [s2] ◄──► [s1] ◄── tail     s0 { freq:2, .. }
//!                    MRU        LRU (evict)      s1 { freq:1, .. }
//!                                                s2 { freq:1, .. }
//!   freq=2: head ──► [s0] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Operation    | Time | Notes                                         |
//! |--------------|------|-----------------------------------------------|
//! | `push_front` | O(1) | Creates the bucket on demand                  |
//! | `unlink`     | O(1) | Drops the bucket once it empties              |
//! | `tail`       | O(1) | Least recently touched slot at a frequency    |
//! | `frequencies`| O(b log b) | Sorted live frequencies, debug use only |
//!
//! ## Implementation Notes
//!
//! - Buckets are stored sparsely: an emptied bucket is removed from the map,
//!   so memory tracks the number of distinct live frequencies rather than the
//!   largest frequency ever reached.
//! - Head is most recently touched, tail least recently touched.
//! - Tracking the minimum frequency is the caller's job; see
//!   [`LfuCache`](crate::policy::lfu::LfuCache).

use rustc_hash::FxHashMap;

use crate::ds::node_pool::{NodePool, SlotId};

/// Smallest bucket map reservation.
pub const MIN_BUCKET_PREALLOC: usize = 16;

/// Capacity divisor for the default bucket map reservation.
pub const BUCKET_PREALLOC_DIVISOR: usize = 10;

/// Default bucket reservation for a cache of `capacity` entries:
/// `max(16, capacity / 10)`.
pub fn default_bucket_prealloc(capacity: usize) -> usize {
    MIN_BUCKET_PREALLOC.max(capacity / BUCKET_PREALLOC_DIVISOR)
}

/// Head/tail/count of one frequency's list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl Bucket {
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push_front<K, V>(&mut self, pool: &mut NodePool<K, V>, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = pool.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(head_id) = old_head {
            if let Some(node) = pool.get_mut(head_id) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        self.len += 1;
    }

    fn unlink<K, V>(&mut self, pool: &mut NodePool<K, V>, id: SlotId) {
        let (prev, next) = match pool.get_mut(id) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match prev.and_then(|p| pool.get_mut(p)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| pool.get_mut(n)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
        self.len = self.len.saturating_sub(1);
    }
}

/// Sparse map from frequency to its bucket list.
#[derive(Debug, Default)]
pub struct FrequencyBuckets {
    buckets: FxHashMap<u64, Bucket>,
}

impl FrequencyBuckets {
    /// Reserves room for `bucket_hint` distinct frequencies.
    pub fn with_capacity(bucket_hint: usize) -> Self {
        Self {
            buckets: FxHashMap::with_capacity_and_hasher(bucket_hint, Default::default()),
        }
    }

    /// Links `id` at the head of bucket `freq` and stamps the node's
    /// frequency.
    #[inline]
    pub fn push_front<K, V>(&mut self, pool: &mut NodePool<K, V>, freq: u64, id: SlotId) {
        if let Some(node) = pool.get_mut(id) {
            node.freq = freq;
        }
        self.buckets
            .entry(freq)
            .or_default()
            .push_front(pool, id);
    }

    /// Unlinks `id` from bucket `freq`. Returns `true` if that emptied the
    /// bucket, which is then dropped from the map.
    #[inline]
    pub fn unlink<K, V>(&mut self, pool: &mut NodePool<K, V>, freq: u64, id: SlotId) -> bool {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return false;
        };
        bucket.unlink(pool, id);
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            return true;
        }
        false
    }

    pub fn get(&self, freq: u64) -> Option<&Bucket> {
        self.buckets.get(&freq)
    }

    #[inline]
    pub fn head(&self, freq: u64) -> Option<SlotId> {
        self.buckets.get(&freq).and_then(Bucket::head)
    }

    #[inline]
    pub fn tail(&self, freq: u64) -> Option<SlotId> {
        self.buckets.get(&freq).and_then(Bucket::tail)
    }

    /// Number of non-empty buckets.
    pub fn active_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Live frequencies in ascending order.
    pub fn frequencies(&self) -> Vec<u64> {
        let mut freqs: Vec<u64> = self.buckets.keys().copied().collect();
        freqs.sort_unstable();
        freqs
    }

    /// Walks bucket `freq` from head (most recent) to tail.
    pub fn iter<'a, K, V>(&self, pool: &'a NodePool<K, V>, freq: u64) -> BucketIter<'a, K, V> {
        BucketIter {
            pool,
            current: self.head(freq),
        }
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

/// Iterator over the slots of one bucket, head to tail.
#[derive(Debug)]
pub struct BucketIter<'a, K, V> {
    pool: &'a NodePool<K, V>,
    current: Option<SlotId>,
}

impl<K, V> Iterator for BucketIter<'_, K, V> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.pool.get(id).and_then(|node| node.next);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(
        buckets: &FrequencyBuckets,
        pool: &NodePool<&'static str, u32>,
        freq: u64,
    ) -> Vec<&'static str> {
        buckets
            .iter(pool, freq)
            .map(|id| *pool.get(id).unwrap().key())
            .collect()
    }

    #[test]
    fn push_front_orders_most_recent_first() {
        let mut pool = NodePool::with_capacity(4);
        let mut buckets = FrequencyBuckets::default();
        let a = pool.allocate("a", 0, 0);
        let b = pool.allocate("b", 0, 0);
        let c = pool.allocate("c", 0, 0);
        buckets.push_front(&mut pool, 1, a);
        buckets.push_front(&mut pool, 1, b);
        buckets.push_front(&mut pool, 1, c);

        assert_eq!(keys_of(&buckets, &pool, 1), vec!["c", "b", "a"]);
        assert_eq!(buckets.head(1), Some(c));
        assert_eq!(buckets.tail(1), Some(a));
        assert_eq!(buckets.get(1).map_or(0, Bucket::len), 3);
        assert_eq!(pool.get(a).unwrap().freq(), 1);
    }

    #[test]
    fn unlink_middle_head_and_tail() {
        let mut pool = NodePool::with_capacity(4);
        let mut buckets = FrequencyBuckets::default();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|k| {
                let id = pool.allocate(k, 0, 0);
                buckets.push_front(&mut pool, 3, id);
                id
            })
            .collect();
        // d c b a
        assert!(!buckets.unlink(&mut pool, 3, ids[1]));
        assert_eq!(keys_of(&buckets, &pool, 3), vec!["d", "c", "a"]);
        assert!(!buckets.unlink(&mut pool, 3, ids[3]));
        assert_eq!(buckets.head(3), Some(ids[2]));
        assert!(!buckets.unlink(&mut pool, 3, ids[0]));
        assert_eq!(buckets.tail(3), Some(ids[2]));
        assert_eq!(keys_of(&buckets, &pool, 3), vec!["c"]);

        let node = pool.get(ids[1]).unwrap();
        assert_eq!((node.prev, node.next), (None, None));
    }

    #[test]
    fn emptied_bucket_is_dropped() {
        let mut pool = NodePool::with_capacity(2);
        let mut buckets = FrequencyBuckets::with_capacity(default_bucket_prealloc(2));
        let a = pool.allocate("a", 0, 0);
        buckets.push_front(&mut pool, 5, a);
        assert_eq!(buckets.active_buckets(), 1);
        assert!(buckets.unlink(&mut pool, 5, a));
        assert!(buckets.get(5).is_none());
        assert_eq!(buckets.active_buckets(), 0);
    }

    #[test]
    fn unlink_from_missing_bucket_is_noop() {
        let mut pool = NodePool::with_capacity(1);
        let mut buckets = FrequencyBuckets::default();
        let a = pool.allocate("a", 0, 0);
        buckets.push_front(&mut pool, 1, a);
        assert!(!buckets.unlink(&mut pool, 2, a));
        assert_eq!(buckets.get(1).map_or(0, Bucket::len), 1);
    }

    #[test]
    fn frequencies_are_sorted() {
        let mut pool = NodePool::with_capacity(3);
        let mut buckets = FrequencyBuckets::default();
        for (k, f) in [("x", 9), ("y", 2), ("z", 4)] {
            let id = pool.allocate(k, 0, 0);
            buckets.push_front(&mut pool, f, id);
        }
        assert_eq!(buckets.frequencies(), vec![2, 4, 9]);
        buckets.clear();
        assert!(buckets.frequencies().is_empty());
    }

    #[test]
    fn default_prealloc_scales_with_capacity() {
        assert_eq!(default_bucket_prealloc(1), 16);
        assert_eq!(default_bucket_prealloc(160), 16);
        assert_eq!(default_bucket_prealloc(1000), 100);
    }
}
