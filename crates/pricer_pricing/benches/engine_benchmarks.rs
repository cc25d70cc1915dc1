//! Criterion benchmarks for the Monte Carlo engine.
//!
//! Benchmarks cover:
//! - RNG performance (scalar vs batch normals)
//! - Reference vs optimized variant across path counts
//! - Chunk size sensitivity of the optimized variant
//! - Plain vs compensated summation
//! - Thread scalability of the optimized variant

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricer_pricing::mc::{EngineConfig, Execution, PricingEngine, Summation};
use pricer_pricing::rng::PricerRng;

/// Benchmark seed shared by every engine run.
const SEED: u64 = 48;

fn atm_engine(config: EngineConfig) -> PricingEngine {
    PricingEngine::new(100.0, 100.0, 0.05, 0.2, 1.0, Some(SEED))
        .unwrap()
        .with_config(config)
}

/// Benchmark RNG generation (foundation for MC simulations).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 100_000] {
        group.throughput(Throughput::Elements(n_samples as u64));

        group.bench_with_input(
            BenchmarkId::new("normal_samples", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(SEED);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        sum += rng.gen_normal();
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(SEED);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Reference vs optimized at increasing path counts.
fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants");
    group.sample_size(20);

    for n_paths in [10_000usize, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(n_paths as u64));

        for execution in [Execution::Reference, Execution::Optimized] {
            let engine = atm_engine(EngineConfig::with_execution(execution));
            group.bench_with_input(
                BenchmarkId::new(execution.to_string(), n_paths),
                &n_paths,
                |b, &n| b.iter(|| engine.price(black_box(n)).unwrap()),
            );
        }
    }

    group.finish();
}

/// Optimized variant with different chunk sizes.
fn bench_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size");
    group.sample_size(20);

    let n_paths = 1_000_000;
    for chunk_size in [4_096usize, 16_384, 65_536, 262_144] {
        let config = EngineConfig::builder()
            .execution(Execution::Optimized)
            .chunk_size(chunk_size)
            .build()
            .unwrap();
        let engine = atm_engine(config);

        group.bench_with_input(
            BenchmarkId::new("optimized", chunk_size),
            &n_paths,
            |b, &n| b.iter(|| engine.price(black_box(n)).unwrap()),
        );
    }

    group.finish();
}

/// Plain vs compensated summation on the reference variant.
fn bench_summation(c: &mut Criterion) {
    let mut group = c.benchmark_group("summation");
    group.sample_size(20);

    let n_paths = 200_000;
    for summation in [Summation::Plain, Summation::Compensated] {
        let config = EngineConfig::builder().summation(summation).build().unwrap();
        let engine = atm_engine(config);

        group.bench_with_input(
            BenchmarkId::new(summation.to_string(), n_paths),
            &n_paths,
            |b, &n| b.iter(|| engine.price(black_box(n)).unwrap()),
        );
    }

    group.finish();
}

/// Optimized variant on pools of different sizes.
fn bench_thread_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_scalability");
    group.sample_size(20);

    let n_paths = 1_000_000;
    let max_threads = rayon::current_num_threads();
    let engine = atm_engine(EngineConfig::with_execution(Execution::Optimized));

    for n_threads in [1, 2, 4, 8].iter().filter(|&&t| t <= max_threads) {
        group.bench_with_input(
            BenchmarkId::new("threads", n_threads),
            n_threads,
            |b, &n_threads| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n_threads)
                    .build()
                    .unwrap();

                b.iter(|| pool.install(|| engine.price(black_box(n_paths)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_variants,
    bench_chunk_size,
    bench_summation,
    bench_thread_scalability
);
criterion_main!(benches);
