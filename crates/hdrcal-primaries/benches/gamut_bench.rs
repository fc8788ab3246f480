//! Benchmarks for gamut geometry and matrix generation.
//!
//! Run with: `cargo bench -p hdrcal-primaries`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hdrcal_primaries::{
    ADOBE_RGB, CoverageReport, DCI_P3, DISPLAY_P3, REC2020, SRGB, gamut_coverage,
    rgb_to_rgb_matrix, rgb_to_xyz_matrix,
};

/// Coverage of a panel against each reference.
fn bench_coverage(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage");

    for reference in [SRGB, ADOBE_RGB, DCI_P3, REC2020] {
        group.bench_function(reference.name, |b| {
            b.iter(|| gamut_coverage(black_box(&DISPLAY_P3), black_box(&reference)))
        });
    }

    group.bench_function("panel_report", |b| {
        b.iter(|| CoverageReport::for_panel(black_box(&DISPLAY_P3)))
    });

    group.finish();
}

/// Primaries matrix construction.
fn bench_matrices(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrices");

    group.bench_function("rgb_to_xyz", |b| {
        b.iter(|| rgb_to_xyz_matrix(black_box(&REC2020)))
    });
    group.bench_function("2020_to_709", |b| {
        b.iter(|| rgb_to_rgb_matrix(black_box(&REC2020), black_box(&SRGB)))
    });

    group.finish();
}

criterion_group!(benches, bench_coverage, bench_matrices);
criterion_main!(benches);
