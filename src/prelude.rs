pub use crate::builder::LfuCacheBuilder;
pub use crate::ds::{FrequencyBuckets, KeyIndex, NodePool, SlotId};
pub use crate::error::{ConfigError, Error, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::LfuMetricsSnapshot;
pub use crate::policy::lfu::{CacheState, LfuCache};
