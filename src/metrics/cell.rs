use std::sync::atomic::{AtomicU64, Ordering};

/// A counter that can be bumped through `&self`.
///
/// Used for operations such as `contains` that only borrow the cache
/// immutably. Relaxed ordering is enough: counters are observational and do
/// not order any other memory.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
