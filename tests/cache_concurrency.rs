// ==============================================
// CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded tests for SlickCache. These require real parallel
// execution and cannot live inline.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use slickcache::cache::SlickCache;

// ==============================================
// Disjoint-Range Writers
// ==============================================
//
// T threads each perform M put/get pairs on disjoint key ranges, with total
// capacity >= T * M so nothing is evicted. After all threads join, the cache
// must hold exactly the expected key/value set, and a full-chain traversal
// must agree with the index.

mod disjoint_ranges {
    use super::*;

    #[test]
    fn no_lost_updates_and_consistent_chain() {
        let threads = 8;
        let per_thread = 200;
        let cache: SlickCache<u64, String> =
            SlickCache::try_new(threads * per_thread).unwrap();
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads as u64)
            .map(|tid| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let base = tid * per_thread as u64;
                    for i in 0..per_thread as u64 {
                        let key = base + i;
                        cache.insert(key, format!("t{tid}:{i}"));
                        let got = cache.get(&key).expect("own key must be present");
                        assert_eq!(*got, format!("t{tid}:{i}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), threads * per_thread);
        for tid in 0..threads as u64 {
            for i in 0..per_thread as u64 {
                let key = tid * per_thread as u64 + i;
                let got = cache.get(&key).expect("no update may be lost");
                assert_eq!(*got, format!("t{tid}:{i}"));
            }
        }
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Contended Key Updates
// ==============================================
//
// All threads hammer the same small key set. Linearizability means every
// surviving value must be one that some thread actually wrote, and the
// chain must stay structurally sound.

mod contended_updates {
    use super::*;

    #[test]
    fn last_writer_wins_with_sound_chain() {
        let threads = 8;
        let rounds = 500;
        let cache: SlickCache<u32, (u32, u32)> = SlickCache::try_new(4).unwrap();
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads as u32)
            .map(|tid| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for round in 0..rounds {
                        let key = round % 4;
                        cache.insert(key, (tid, round));
                        if let Some(value) = cache.get(&key) {
                            // Whatever we read was written intact by someone.
                            assert!(value.0 < threads as u32);
                            assert!(value.1 < rounds);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 4);
        cache.check_invariants().unwrap();
        for key in 0..4 {
            let value = cache.get(&key).expect("contended keys stay resident");
            assert!(value.0 < threads as u32);
        }
    }
}

// ==============================================
// Eviction Under Contention
// ==============================================
//
// Writers overflow a small cache from all sides. Occupancy must never
// exceed capacity and the index/chain/policy triple must stay in agreement
// throughout.

mod eviction_churn {
    use super::*;

    #[test]
    fn concurrent_overflow_respects_capacity() {
        let threads = 8;
        let per_thread = 300u64;
        let capacity = 16;

        for _ in 0..20 {
            let cache: SlickCache<u64, u64> = SlickCache::try_new(capacity).unwrap();
            let barrier = Arc::new(Barrier::new(threads));

            let handles: Vec<_> = (0..threads as u64)
                .map(|tid| {
                    let cache = cache.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        for i in 0..per_thread {
                            let key = tid * per_thread + i;
                            cache.insert(key, key * 2);
                            let _ = cache.get(&key);
                            assert!(cache.len() <= capacity);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(cache.len(), capacity);
            assert_eq!(cache.occupancy(), capacity);
            cache.check_invariants().unwrap();

            // Every resident value still matches its key.
            while let Some((key, value)) = cache.pop_lru() {
                assert_eq!(*value, key * 2);
            }
            assert!(cache.is_empty());
            cache.check_invariants().unwrap();
        }
    }
}

// ==============================================
// Mixed Readers and Writers
// ==============================================

mod mixed_workload {
    use super::*;

    #[test]
    fn readers_writers_and_removers_interleave_safely() {
        let cache: SlickCache<u32, String> = SlickCache::try_new(32).unwrap();
        for i in 0..32 {
            cache.insert(i, format!("seed{i}"));
        }

        let barrier = Arc::new(Barrier::new(4));

        let writer = {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1000u32 {
                    cache.insert(i % 64, format!("w{i}"));
                }
            })
        };

        let reader = {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1000u32 {
                    let _ = cache.get(&(i % 64));
                    let _ = cache.peek(&(i % 64));
                    let _ = cache.contains(&(i % 64));
                }
            })
        };

        let toucher = {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1000u32 {
                    let _ = cache.touch(&(i % 64));
                }
            })
        };

        let remover = {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..500u32 {
                    let _ = cache.remove(&(i % 64));
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        toucher.join().unwrap();
        remover.join().unwrap();

        assert!(cache.len() <= 32);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Shared Value Ownership
// ==============================================
//
// Values handed out as Arc clones must stay readable after the entry
// behind them is evicted.

mod value_ownership {
    use super::*;

    #[test]
    fn evicted_values_survive_through_arcs() {
        let cache: SlickCache<u32, String> = SlickCache::try_new(1).unwrap();
        cache.insert(1, "held".to_string());
        let held = cache.get(&1).unwrap();

        cache.insert(2, "evictor".to_string());
        assert!(!cache.contains(&1));
        assert_eq!(*held, "held");
    }
}
