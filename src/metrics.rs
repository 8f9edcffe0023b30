//! Operation counters for the cache engine, gated behind the `metrics`
//! cargo feature.
//!
//! Recording is separated from consumption: the engine writes counters as a
//! side effect of each operation, and callers read a plain-data
//! [`CacheMetricsSnapshot`] whenever they want a consistent view. Counters
//! on `&self` read paths (`peek`) go through [`MetricsCell`] so recording
//! does not require a mutable borrow.

use std::cell::Cell;

/// Interior-mutable counter for read-path recording.
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    /// Returns the current count.
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// Adds one to the count.
    #[inline]
    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Live counters owned by the cache engine.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_hits: MetricsCell,
}

impl CacheMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }

    #[inline]
    pub fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evict_calls += 1;
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_pop_lru(&mut self, found: bool) {
        self.pop_lru_calls += 1;
        if found {
            self.pop_lru_found += 1;
        }
    }

    #[inline]
    pub fn record_touch(&mut self, found: bool) {
        self.touch_calls += 1;
        if found {
            self.touch_found += 1;
        }
    }

    #[inline]
    pub fn record_peek(&self, hit: bool) {
        self.peek_calls.increment();
        if hit {
            self.peek_hits.increment();
        }
    }
}

/// Point-in-time copy of the engine's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_hits: u64,
    pub cache_len: usize,
    pub occupancy: usize,
}
