/// Point-in-time copy of [`LfuMetrics`](crate::metrics::metrics_impl::LfuMetrics)
/// plus gauges captured from the cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LfuMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub strict_misses: u64,
    pub fallback_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub contains_calls: u64,
    pub contains_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub min_freq: u64,
}

impl LfuMetricsSnapshot {
    /// Fraction of lookups that hit, or `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
