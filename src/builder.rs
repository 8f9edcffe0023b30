//! Cache builder: capacity and policy configuration in one place.
//!
//! Exactly one of the two knobs must end up determining eviction behavior.
//! The precedence is asymmetric and deliberate: **an explicit policy always
//! wins**, and a numeric capacity supplied alongside it is ignored outright
//! — the builder never picks "whichever is smaller". Supplying neither is a
//! configuration error, because a cache with unbounded, policy-less growth
//! is not a valid configuration.
//!
//! ## Example
//!
//! ```
//! use slickcache::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new()
//!     .capacity(100)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(*cache.get(&1).unwrap(), "hello");
//! ```

use std::hash::Hash;

#[cfg(feature = "concurrency")]
use crate::cache::SlickCache;
use crate::cache::CacheCore;
use crate::error::ConfigError;
use crate::policy::{BoxedPolicy, EvictionPolicy, MaxSizeEvictionPolicy};

/// Builder for cache instances.
#[derive(Default)]
pub struct CacheBuilder {
    capacity: Option<usize>,
    policy: Option<BoxedPolicy>,
}

impl CacheBuilder {
    /// Creates a builder with neither capacity nor policy configured.
    pub fn new() -> Self {
        Self {
            capacity: None,
            policy: None,
        }
    }

    /// Sets a maximum entry count, used when no explicit policy is given.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets an explicit eviction policy. Takes precedence over
    /// [`capacity`](Self::capacity); a capacity configured alongside it is
    /// ignored.
    pub fn policy<P>(mut self, policy: P) -> Self
    where
        P: EvictionPolicy + Send + Sync + 'static,
    {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Builds a single-threaded [`CacheCore`].
    ///
    /// Returns [`ConfigError`] when neither capacity nor policy was
    /// configured, or when the configured capacity is zero.
    pub fn try_build_core<K, V>(self) -> Result<CacheCore<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        Ok(CacheCore::with_policy(self.resolve()?))
    }

    /// Builds a thread-safe [`SlickCache`].
    ///
    /// Returns [`ConfigError`] when neither capacity nor policy was
    /// configured, or when the configured capacity is zero.
    #[cfg(feature = "concurrency")]
    pub fn try_build<K, V>(self) -> Result<SlickCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Send + Sync,
    {
        Ok(SlickCache::with_policy(self.resolve()?))
    }

    fn resolve(self) -> Result<BoxedPolicy, ConfigError> {
        match (self.policy, self.capacity) {
            // Explicit policy wins; any configured capacity is ignored.
            (Some(policy), _) => Ok(policy),
            (None, Some(capacity)) => Ok(Box::new(MaxSizeEvictionPolicy::try_new(capacity)?)),
            (None, None) => Err(ConfigError::new(
                "cache requires a capacity or an eviction policy",
            )),
        }
    }
}
