use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hdrfixed::Histogram;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0xC0FFEE;

/// Values spread evenly across magnitudes, so every bucket sees traffic.
fn random_values(n: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    (0..n)
        .map(|_| {
            let bits = rng.gen_range(0..64_u32);
            (rng.gen::<u64>() >> bits).max(1)
        })
        .collect()
}

fn bench_record(c: &mut Criterion) {
    let sizes = [1_000, 100_000];

    let mut group = c.benchmark_group("Histogram/record");
    for size in sizes.iter() {
        let values = random_values(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("u64", size), &values, |b, values| {
            let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
            b.iter(|| {
                for v in values {
                    h.record(*v).unwrap();
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("u8-saturated", size), &values, |b, values| {
            let mut h = Histogram::<u8>::new_with_bounds(1, u64::max_value(), 3).unwrap();
            // every slot starts out full so each record hits the saturating path
            for v in values {
                h.record_n(*v, u8::max_value()).unwrap();
            }
            b.iter(|| {
                for v in values {
                    h.record(*v).unwrap();
                }
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Histogram/record-correct");
    let values = random_values(10_000);
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("u64", |b| {
        let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
        b.iter(|| {
            for v in &values {
                // a big interval, so only a handful of values get back-filled
                h.record_correct(*v, 1 << 54).unwrap();
            }
        });
    });
    group.finish();
}

fn bench_index_for(c: &mut Criterion) {
    let h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
    let values = random_values(10_000);

    let mut group = c.benchmark_group("Histogram/index_for");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("sigfig-3", |b| {
        b.iter(|| {
            for v in &values {
                black_box(h.index_for(*v));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_record, bench_index_for);
criterion_main!(benches);
