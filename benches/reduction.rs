use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use parsum::parallel::{ParallelReducer, RayonReducer, SequentialReducer};
use parsum::sample::Sampler;
use std::hint::black_box;
use std::time::Duration;

const SIZES: [usize; 3] = [10_000, 1_000_000, 10_000_000];
const WORKERS: usize = 8;

fn bench_reduction(c: &mut Criterion) {
    let sampler = Sampler::default().with_seed(Some(0));
    let scoped = ParallelReducer::new(WORKERS).unwrap();
    let rayon = RayonReducer::new(WORKERS).unwrap();

    let mut group = c.benchmark_group("reduction");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for size in SIZES {
        let samples = sampler.generate(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &samples, |b, s| {
            b.iter(|| SequentialReducer::sum(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("scoped", size), &samples, |b, s| {
            b.iter(|| scoped.sum(black_box(s)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("rayon", size), &samples, |b, s| {
            b.iter(|| rayon.sum(black_box(s)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduction);
criterion_main!(benches);
