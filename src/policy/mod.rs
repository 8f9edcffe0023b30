//! Eviction-policy abstraction.
//!
//! A policy decides *whether* an insertion must evict; the engine decides
//! *what* to evict (always the least-recently-used entry) and performs the
//! structural work. The contract is deliberately small — occupancy tracking
//! plus the eviction decision — so that policies keyed on something other
//! than entry count (time-to-live, weighted cost) plug in without engine
//! changes.
//!
//! Occupancy is mutated exclusively by the engine through
//! [`record_insertion`](EvictionPolicy::record_insertion) /
//! [`record_removal`](EvictionPolicy::record_removal) /
//! [`reset`](EvictionPolicy::reset). A policy must not bump its own counter
//! from inside [`requires_eviction`](EvictionPolicy::requires_eviction);
//! that query is pure. Keeping all bookkeeping on the engine side rules out
//! double-counting between the chain and the policy.

pub mod max_size;

pub use max_size::MaxSizeEvictionPolicy;

/// Owned, thread-safe policy handle as stored by the cache engine.
pub type BoxedPolicy = Box<dyn EvictionPolicy + Send + Sync>;

/// Strategy consulted by the cache engine on every structural insertion.
///
/// Invariant: between operations, [`occupancy`](Self::occupancy) equals the
/// number of live entries in the cache. Mid-operation the counter may lag
/// the chain by one; the engine restores agreement before releasing the
/// concurrency guard.
pub trait EvictionPolicy {
    /// Returns `true` iff the cache must evict an entry to make room.
    ///
    /// Pure query: no side effects. Called by the engine after a new entry
    /// has been linked in but before its insertion has been recorded, so the
    /// occupancy seen here is the pre-insertion count.
    fn requires_eviction(&self) -> bool;

    /// Current number of live entries, as recorded by the engine.
    fn occupancy(&self) -> usize;

    /// Records one structural insertion. Engine-driven only.
    fn record_insertion(&mut self);

    /// Records one structural removal. Engine-driven only.
    fn record_removal(&mut self);

    /// Resets occupancy to zero (the engine cleared the cache).
    fn reset(&mut self);
}
