//! Benchmarks for the month-banded layout.
//!
//! The relaxation runs a fixed 300 ticks, so cost is dominated by the
//! collision pass. Dense inputs (many posts per band with close
//! `Dimension 1` values) are the worst case for the sweep.
//!
//! Run with: cargo bench -p sentiscope-layout --bench layout_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sentiscope_core::Post;
use sentiscope_core::post::PostRecord;
use sentiscope_layout::{LayoutConfig, MonthBands, compute_layout};
use std::hint::black_box;

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

fn posts(count: usize, spread: f64) -> Vec<Post> {
    (0..count)
        .map(|i| {
            // Deterministic scatter without pulling in an RNG.
            let d1 = ((i * 7919) % 1000) as f64 / 1000.0 * spread;
            let record = PostRecord::new(i as i64, "b'bench'", MONTHS[i % MONTHS.len()])
                .dimensions(d1, 0.0);
            Post::from(record)
        })
        .collect()
}

// =============================================================================
// Full layout
// =============================================================================

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/compute");
    let config = LayoutConfig::default();

    for count in [50usize, 500, 2000] {
        group.throughput(Throughput::Elements(count as u64));

        let sparse = posts(count, 100.0);
        group.bench_with_input(BenchmarkId::new("sparse", count), &sparse, |b, p| {
            b.iter(|| black_box(compute_layout(black_box(p), &config)))
        });

        let dense = posts(count, 0.01);
        group.bench_with_input(BenchmarkId::new("dense", count), &dense, |b, p| {
            b.iter(|| black_box(compute_layout(black_box(p), &config)))
        });
    }

    group.finish();
}

// =============================================================================
// Band assignment
// =============================================================================

fn bench_month_bands(c: &mut Criterion) {
    let input = posts(5000, 1.0);
    c.bench_function("layout/month_bands_5000", |b| {
        b.iter(|| black_box(MonthBands::new(input.iter().map(Post::month), 640.0)))
    });
}

criterion_group!(benches, bench_compute_layout, bench_month_bands);
criterion_main!(benches);
