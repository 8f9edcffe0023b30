//! Convenience re-exports for common usage.

pub use crate::builder::CacheBuilder;
pub use crate::cache::CacheCore;
#[cfg(feature = "concurrency")]
pub use crate::cache::SlickCache;
pub use crate::ds::{EntryId, RecencyList};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::CacheMetricsSnapshot;
pub use crate::policy::{BoxedPolicy, EvictionPolicy, MaxSizeEvictionPolicy};
