//! Error types for the slickcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (no eviction behavior configured, or a non-positive capacity).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (diagnostic `check_invariants` methods).
//!
//! Construction is the only fallible surface of the cache: once a cache is
//! built, `insert` cannot fail and a `get` miss is reported as `None`, never
//! as an error.
//!
//! ## Example Usage
//!
//! ```
//! use slickcache::cache::CacheCore;
//! use slickcache::error::ConfigError;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<CacheCore<u64, String>, ConfigError> = CacheCore::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = CacheCore::<u64, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`CacheCore::try_new`](crate::cache::CacheCore::try_new),
/// [`MaxSizeEvictionPolicy::try_new`](crate::policy::MaxSizeEvictionPolicy::try_new)
/// and [`CacheBuilder::try_build_core`](crate::builder::CacheBuilder::try_build_core).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use slickcache::policy::MaxSizeEvictionPolicy;
///
/// let err = MaxSizeEvictionPolicy::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by diagnostic `check_invariants` methods on the recency chain and
/// the cache engine (e.g.
/// [`CacheCore::check_invariants`](crate::cache::CacheCore::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
