//! # LRU cache engine
//!
//! Hash-indexed, recency-ordered key/value cache with O(1) insert, lookup,
//! promotion and eviction, plus a thread-safe wrapper for shared use.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                      SlickCache<K, V>                        │
//!   │                                                              │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │              Arc<RwLock<CacheCore<K, V>>>              │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   │                             │                                │
//!   │                             ▼                                │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │                   CacheCore<K, V>                      │ │
//!   │   │                                                        │ │
//!   │   │   FxHashMap<K, EntryId>      (index into the chain)    │ │
//!   │   │                                                        │ │
//!   │   │   RecencyList<Entry<K, V>>   (arena-owned entries)     │ │
//!   │   │     front ─► [LRU] ◄──► … ◄──► [MRU] ◄── back          │ │
//!   │   │                                                        │ │
//!   │   │   Box<dyn EvictionPolicy>    (occupancy + decision)    │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The chain's arena exclusively owns every entry (`key` + `Arc`-wrapped
//! value); the hash index holds [`EntryId`] handles into the arena, never
//! references, so index and chain can be mutated in lock-step without
//! lifetime hazards. Values are `Arc<V>` so the concurrent wrapper hands out
//! clones without copying data.
//!
//! ## Operations
//!
//! | Method           | Complexity | Description                               |
//! |------------------|------------|-------------------------------------------|
//! | `insert(k, v)`   | O(1)*      | Insert or update; may evict the LRU entry |
//! | `get(&k)`        | O(1)       | Lookup; promotes the entry to MRU         |
//! | `peek(&k)`       | O(1)       | Lookup without promotion                  |
//! | `remove(&k)`     | O(1)       | Unlink from chain and index               |
//! | `pop_lru()`      | O(1)       | Remove and return the LRU entry           |
//! | `touch(&k)`      | O(1)       | Promote without retrieving                |
//! | `len()`          | O(1)       | Live entry count                          |
//!
//! Promotion happens on **every** successful lookup, not just on insertion;
//! it unlinks the entry from whichever of the three structural positions it
//! occupies (front, interior, back — at most two neighbor relinks each) and
//! re-links it at the MRU end. Promoting the entry already at the MRU end is
//! a true no-op.
//!
//! ## Eviction
//!
//! The engine consults its [`EvictionPolicy`](crate::policy::EvictionPolicy)
//! only when a *new* key is
//! linked in; updates to existing keys never grow occupancy and never
//! consult the policy. When the policy demands room, the chain front (the
//! least-recently-used entry) is unlinked from both chain and index. The
//! just-inserted entry sits at the back and is never the victim.
//!
//! ## Concurrency Model
//!
//! ```text
//!   Thread 1           Thread 2           Thread 3
//!      │ get(k1)          │ insert(k2, v)    │ peek(k3)
//!      ▼                  ▼                  ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                        RwLock                            │
//!   │                                                          │
//!   │  insert()/get()/remove() take the WRITE lock             │
//!   │  (get promotes, so even a read mutates the chain)        │
//!   │  peek()/contains()/len() take the READ lock              │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is one shared primitive owned by the cache instance. Each public
//! operation acquires it exactly once, performs the index lookup, chain
//! relinking and occupancy update as a single critical section, and releases
//! it on every exit path by scope. No operation holds it across a suspension
//! point or external call, and no partial state (index updated, chain not
//! yet relinked) is ever observable from another thread. Concurrent calls
//! are linearizable; no fairness order is guaranteed.
//!
//! ## Safety
//!
//! Safe Rust throughout: entries are addressed by arena handles, not raw
//! pointers, so `CacheCore` is `Send`/`Sync` by auto traits alone whenever
//! `K` and `V` are.
//!
//! ## Example
//!
//! ```
//! use slickcache::cache::SlickCache;
//!
//! let cache: SlickCache<u32, String> = SlickCache::try_new(2).unwrap();
//! cache.insert(1, "one".to_string());
//! cache.insert(2, "two".to_string());
//!
//! // Reading key 1 promotes it, so key 2 is now the eviction candidate.
//! assert_eq!(*cache.get(&1).unwrap(), "one");
//! cache.insert(3, "three".to_string());
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&3));
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{EntryId, RecencyList};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::policy::{BoxedPolicy, MaxSizeEvictionPolicy};

/// Unit stored per key in the chain's arena.
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// Single-threaded cache engine: hash index + recency chain + policy.
///
/// Thread safety is provided by the [`SlickCache`] wrapper; the core itself
/// requires `&mut` for every mutating operation.
pub struct CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, EntryId>,
    chain: RecencyList<Entry<K, V>>,
    policy: BoxedPolicy,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache evicting beyond `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::CacheCore;
    ///
    /// let cache: CacheCore<u32, String> = CacheCore::try_new(100).unwrap();
    /// assert!(cache.is_empty());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let policy = MaxSizeEvictionPolicy::try_new(capacity)?;
        Ok(Self::with_policy(Box::new(policy)))
    }

    /// Creates a cache governed by an explicit eviction policy.
    ///
    /// The engine drives the policy purely through the
    /// [`EvictionPolicy`](crate::policy::EvictionPolicy) contract, so
    /// policies keyed on something other than entry count plug in without
    /// engine changes.
    pub fn with_policy(policy: BoxedPolicy) -> Self {
        Self {
            index: FxHashMap::default(),
            chain: RecencyList::new(),
            policy,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Inserts a key/value pair, returning the previous value if the key
    /// was already present.
    ///
    /// An existing key is updated in place and promoted to the MRU end; the
    /// policy is not consulted, since an update never grows occupancy. A new
    /// key is appended at the MRU end and registered in the index, after
    /// which the policy decides whether the LRU entry must be evicted.
    pub fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.chain.get_mut(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();

                let previous = std::mem::replace(&mut entry.value, value);
                self.chain.promote(id);
                return Some(previous);
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.chain.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        // Eviction trades the chain front for the entry just linked at the
        // back, leaving occupancy unchanged. The front is never the new
        // entry itself: a policy with capacity >= 1 only demands eviction
        // once at least one older entry exists.
        if self.policy.requires_eviction() && self.chain.front_id() != Some(id) {
            if let Some(evicted) = self.chain.pop_front() {
                self.index.remove(&evicted.key);
                #[cfg(feature = "metrics")]
                self.metrics.record_eviction();
            }
        } else {
            self.policy.record_insertion();
        }

        None
    }

    /// Looks up a key, promoting its entry to the MRU end on a hit.
    ///
    /// A miss leaves the chain and occupancy untouched and returns `None`;
    /// absence is a normal result, never an error.
    pub fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.chain.promote(id);
        self.chain.get(id).map(|entry| &entry.value)
    }

    /// Looks up a key without touching the recency order.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let found = self
            .index
            .get(key)
            .and_then(|&id| self.chain.get(id))
            .map(|entry| Arc::clone(&entry.value));

        #[cfg(feature = "metrics")]
        self.metrics.record_peek(found.is_some());

        found
    }

    /// Returns `true` if the key is present. Does not affect recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the occupancy recorded by the eviction policy.
    ///
    /// Between operations this equals [`len`](Self::len).
    pub fn occupancy(&self) -> usize {
        self.policy.occupancy()
    }

    /// Removes a key from chain and index, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let id = self.index.remove(key)?;
        let entry = self.chain.remove(id)?;
        self.policy.record_removal();
        Some(entry.value)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        let entry = self.chain.pop_front();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru(entry.is_some());

        let entry = entry?;
        self.index.remove(&entry.key);
        self.policy.record_removal();
        Some((entry.key, entry.value))
    }

    /// Returns the least-recently-used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        self.chain.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Promotes a key to the MRU end without retrieving its value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&mut self, key: &K) -> bool {
        let found = match self.index.get(key) {
            Some(&id) => self.chain.promote(id),
            None => false,
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch(found);

        found
    }

    /// Removes all entries and resets the policy's occupancy.
    pub fn clear(&mut self) {
        self.index.clear();
        self.chain.clear();
        self.policy.reset();
    }

    /// Verifies that index, chain and policy agree.
    ///
    /// Walks the chain in both directions, checks that every chain entry is
    /// indexed under its own key with its own handle, and that the policy's
    /// occupancy matches the live entry count.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.chain.check_invariants()?;

        if self.index.len() != self.chain.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, chain holds {} entries",
                self.index.len(),
                self.chain.len()
            )));
        }

        for id in self.chain.iter_ids() {
            let entry = self
                .chain
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dead slot {} in chain", id.index())))?;
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index handle for chain slot {} points elsewhere",
                    id.index()
                )));
            }
        }

        if self.policy.occupancy() != self.chain.len() {
            return Err(InvariantError::new(format!(
                "policy occupancy {} does not match {} live entries",
                self.policy.occupancy(),
                self.chain.len()
            )));
        }

        Ok(())
    }

    #[cfg(feature = "metrics")]
    /// Returns a point-in-time copy of the engine's operation counters.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_hits: self.metrics.peek_hits.get(),
            cache_len: self.len(),
            occupancy: self.policy.occupancy(),
        }
    }
}

impl<K, V> fmt::Debug for CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCore")
            .field("len", &self.len())
            .field("occupancy", &self.occupancy())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, Arc<V>)> for CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, Arc<V>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe cache handle wrapping [`CacheCore`] in a shared `RwLock`.
///
/// Cloning a `SlickCache` yields another handle to the same cache. Every
/// public operation is one atomic critical section: callers on other threads
/// block until the section completes and then observe a fully consistent
/// index/chain/occupancy state.
#[cfg(feature = "concurrency")]
pub struct SlickCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<CacheCore<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for SlickCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for SlickCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("SlickCache")
            .field("len", &cache.len())
            .field("occupancy", &cache.occupancy())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> SlickCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a thread-safe cache evicting beyond `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(100).unwrap();
    /// assert!(cache.is_empty());
    /// assert!(SlickCache::<u32, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_core(CacheCore::try_new(capacity)?))
    }

    /// Creates a thread-safe cache governed by an explicit eviction policy.
    pub fn with_policy(policy: BoxedPolicy) -> Self {
        Self::from_core(CacheCore::with_policy(policy))
    }

    /// Returns a builder for configuring capacity and policy together.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache = SlickCache::<u32, String>::builder()
    ///     .capacity(100)
    ///     .try_build::<u32, String>()
    ///     .unwrap();
    /// assert!(cache.is_empty());
    /// ```
    pub fn builder() -> crate::builder::CacheBuilder {
        crate::builder::CacheBuilder::new()
    }

    pub(crate) fn from_core(core: CacheCore<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(core)),
        }
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns the previous `Arc<V>` if the key existed.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(100).unwrap();
    ///
    /// let old = cache.insert(1, "first".to_string());
    /// assert!(old.is_none());
    ///
    /// let old = cache.insert(1, "updated".to_string());
    /// assert_eq!(*old.unwrap(), "first");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// Inserts a pre-wrapped `Arc<V>` directly, sharing it with the caller.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    /// use std::sync::Arc;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(100).unwrap();
    /// let shared = Arc::new("shared".to_string());
    /// cache.insert_arc(1, Arc::clone(&shared));
    ///
    /// let retrieved = cache.get(&1).unwrap();
    /// assert!(Arc::ptr_eq(&shared, &retrieved));
    /// ```
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// Looks up a key, promoting it to the MRU position on a hit.
    ///
    /// Takes the write lock because promotion mutates the chain. A miss
    /// returns `None` with nothing changed.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(100).unwrap();
    /// cache.insert(1, "value".to_string());
    ///
    /// assert_eq!(*cache.get(&1).unwrap(), "value");
    /// assert!(cache.get(&999).is_none());
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Looks up a key without affecting the recency order.
    ///
    /// Only takes the read lock, so concurrent peeks do not serialize.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(2).unwrap();
    /// cache.insert(1, "first".to_string());
    /// cache.insert(2, "second".to_string());
    ///
    /// // Peeking key 1 leaves it least-recently-used, so the next insert
    /// // still evicts it.
    /// assert_eq!(*cache.peek(&1).unwrap(), "first");
    /// cache.insert(3, "third".to_string());
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.read();
        cache.peek(key)
    }

    /// Removes an entry and returns its value.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(100).unwrap();
    /// cache.insert(1, "value".to_string());
    ///
    /// assert_eq!(*cache.remove(&1).unwrap(), "value");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Marks an entry as most-recently-used without retrieving it.
    ///
    /// # Example
    ///
    /// ```
    /// use slickcache::cache::SlickCache;
    ///
    /// let cache: SlickCache<u32, String> = SlickCache::try_new(3).unwrap();
    /// cache.insert(1, "a".to_string());
    /// cache.insert(2, "b".to_string());
    /// cache.insert(3, "c".to_string());
    ///
    /// assert!(cache.touch(&1));
    /// cache.insert(4, "d".to_string());
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// assert!(!cache.touch(&999));
    /// ```
    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Returns the least-recently-used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache
            .peek_lru()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    /// Returns `true` if the key is present. Does not affect recency order.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    /// Returns the occupancy recorded by the eviction policy.
    pub fn occupancy(&self) -> usize {
        let cache = self.inner.read();
        cache.occupancy()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear()
    }

    /// Verifies that index, chain and policy agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let cache = self.inner.read();
        cache.check_invariants()
    }

    #[cfg(feature = "metrics")]
    /// Returns a point-in-time copy of the engine's operation counters.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}
