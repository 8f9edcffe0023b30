use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slickcache::cache::CacheCore;

fn warmed(capacity: usize) -> CacheCore<u64, u64> {
    let mut cache = CacheCore::try_new(capacity).unwrap();
    for i in 0..capacity as u64 {
        cache.insert(i, Arc::new(i));
    }
    cache
}

fn bench_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || warmed(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), Arc::new(i));
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || warmed(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_promote_hotset(c: &mut Criterion) {
    c.bench_function("lru_promote_hotset", |b| {
        b.iter_batched(
            || warmed(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_random_mixed(c: &mut Criterion) {
    c.bench_function("lru_random_mixed", |b| {
        b.iter_batched(
            || {
                let rng = StdRng::seed_from_u64(0xCAC4E);
                (warmed(1024), rng)
            },
            |(mut cache, mut rng)| {
                for _ in 0..4096 {
                    let key = rng.gen_range(0..2048u64);
                    if rng.gen_bool(0.25) {
                        cache.insert(std::hint::black_box(key), Arc::new(key));
                    } else {
                        let _ = std::hint::black_box(cache.get(&std::hint::black_box(key)));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert_get,
    bench_eviction_churn,
    bench_promote_hotset,
    bench_random_mixed
);
criterion_main!(benches);
