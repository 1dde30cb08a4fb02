//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`Error`]: The crate-level error returned by fallible cache operations.
//!   Only two kinds exist: a strict lookup miss and a rejected configuration.
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. zero capacity).
//! - [`InvariantError`]: Returned by
//!   [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants)
//!   when internal bookkeeping has diverged.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::error::{ConfigError, Error};
//! use lfukit::policy::lfu::LfuCache;
//!
//! // Fallible constructor for user-configurable capacity
//! let bad: Result<LfuCache<u64, u64>, ConfigError> = LfuCache::try_new(0);
//! assert!(bad.is_err());
//!
//! // Strict lookups surface misses as `Error::KeyNotFound`
//! let mut cache: LfuCache<u64, u64> = LfuCache::new(4);
//! assert_eq!(cache.try_get(&7), Err(Error::KeyNotFound));
//! ```

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Crate-level error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The strict lookup found no entry for the requested key.
    #[error("key not found")]
    KeyNotFound,
    /// The cache could not be constructed with the requested parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Crate-level result.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LfuCache::try_new`](crate::policy::lfu::LfuCache::try_new) and
/// [`LfuCacheBuilder::try_build`](crate::builder::LfuCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use lfukit::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
