//! Counters for the `metrics` feature.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::LfuMetrics;
pub use snapshot::LfuMetricsSnapshot;
