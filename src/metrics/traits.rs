//! # Metrics Traits
//!
//! Recording and snapshotting are split into small traits so the cache only
//! ever writes counters, while tests and benches read them through a
//! provider.
//!
//! ```text
//!   ┌─────────────────────────────┐      ┌──────────────────────────────┐
//!   │     CoreMetricsRecorder     │      │ MetricsSnapshotProvider<S>   │
//!   │  get_hit/get_miss/insert    │      │ (bench/test)                 │
//!   │  evict/clear                │      └──────────────────────────────┘
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     LfuMetricsRecorder      │
//!   │  strict_miss/fallback_miss  │
//!   └─────────────────────────────┘
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LFU lookup variants that report a miss differently.
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    /// A `try_get` miss surfaced as `Error::KeyNotFound`.
    fn record_strict_miss(&mut self);
    /// A `get_or` miss answered with the caller's fallback.
    fn record_fallback_miss(&mut self);
}

/// Read-only LFU metrics for `&self` methods (uses interior mutability).
pub trait LfuMetricsReadRecorder {
    fn record_contains_call(&self);
    fn record_contains_found(&self);
}

/// Produce a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
