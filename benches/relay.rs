//! Relay throughput versus collecting batches eagerly.

use std::hint::black_box;

use batchbuf::relay;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

const ITEMS: u64 = 100_000;
const CAPACITY: usize = 64;

fn bench_relay(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay");
    group.throughput(Throughput::Elements(ITEMS));

    group.bench_function("identity", |b| {
        b.iter(|| {
            relay(0..ITEMS, CAPACITY, |batch| batch)
                .unwrap()
                .map(black_box)
                .count()
        })
    });

    group.bench_function("batch_sums", |b| {
        b.iter(|| {
            relay(0..ITEMS, CAPACITY, |batch| [batch.iter().sum::<u64>()])
                .unwrap()
                .map(black_box)
                .count()
        })
    });

    group.bench_function("chunks_baseline", |b| {
        b.iter(|| {
            let items: Vec<u64> = (0..ITEMS).collect();
            items
                .chunks(CAPACITY)
                .map(|batch| black_box(batch.iter().sum::<u64>()))
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_relay);
criterion_main!(benches);
