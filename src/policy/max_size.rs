//! Entry-count eviction policy.

use crate::error::ConfigError;
use crate::policy::EvictionPolicy;

/// Evicts when the cache holds `capacity` entries and a new key arrives.
///
/// The capacity is fixed at construction and must be at least 1; a cache
/// that can hold nothing would evict every entry the moment it is inserted.
///
/// # Example
///
/// ```
/// use slickcache::policy::{EvictionPolicy, MaxSizeEvictionPolicy};
///
/// let mut policy = MaxSizeEvictionPolicy::try_new(2).unwrap();
/// assert!(!policy.requires_eviction());
///
/// policy.record_insertion();
/// policy.record_insertion();
/// assert!(policy.requires_eviction());
///
/// policy.record_removal();
/// assert!(!policy.requires_eviction());
/// ```
#[derive(Debug, Clone)]
pub struct MaxSizeEvictionPolicy {
    capacity: usize,
    occupancy: usize,
}

impl MaxSizeEvictionPolicy {
    /// Creates a policy that caps the cache at `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 1 {
            return Err(ConfigError::new("cache capacity must be at least 1"));
        }
        Ok(Self {
            capacity,
            occupancy: 0,
        })
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl EvictionPolicy for MaxSizeEvictionPolicy {
    fn requires_eviction(&self) -> bool {
        self.occupancy >= self.capacity
    }

    fn occupancy(&self) -> usize {
        self.occupancy
    }

    fn record_insertion(&mut self) {
        self.occupancy += 1;
    }

    fn record_removal(&mut self) {
        self.occupancy = self.occupancy.saturating_sub(1);
    }

    fn reset(&mut self) {
        self.occupancy = 0;
    }
}
