pub mod frequency_buckets;
pub mod key_index;
pub mod node_pool;

pub use frequency_buckets::{
    BUCKET_PREALLOC_DIVISOR, Bucket, BucketIter, FrequencyBuckets, MIN_BUCKET_PREALLOC,
    default_bucket_prealloc,
};
pub use key_index::KeyIndex;
pub use node_pool::{Node, NodePool, SlotId};
