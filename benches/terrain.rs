//! Criterion benchmarks for terrain generation.
//!
//! Benchmarks:
//!   - full regeneration at resolution 256 (both height modes)
//!   - in-place height update at resolution 256
//!   - raw simplex sampling
//!
//! Budget: regeneration at 256 < 16 ms.
//!
//! Run with: cargo bench --bench terrain

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use planetscape::params::{HeightMode, TerrainSettings};
use planetscape::simplex::SimplexNoise2D;
use planetscape::terrain::{HeightFieldSynthesizer, TerrainMesh};

fn settings(mode: HeightMode) -> TerrainSettings {
    TerrainSettings {
        resolution: 256,
        mode,
        ..TerrainSettings::default()
    }
}

// ---------------------------------------------------------------------------
// Benchmark: regenerate / update_heights
// ---------------------------------------------------------------------------

fn bench_regenerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_regenerate");
    group.sample_size(20);

    for (name, mode) in [
        ("closed_form_256", HeightMode::ClosedForm),
        ("octaves_256", HeightMode::Octaves),
    ] {
        let settings = settings(mode);
        let mut mesh = TerrainMesh::new(HeightFieldSynthesizer::default(), &settings)
            .expect("valid settings");
        group.bench_function(name, |b| {
            b.iter(|| mesh.regenerate(black_box(&settings)));
        });
    }

    group.finish();
}

fn bench_update_heights(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_update_heights");
    group.sample_size(20);

    let base = settings(HeightMode::Octaves);
    let mut mesh =
        TerrainMesh::new(HeightFieldSynthesizer::default(), &base).expect("valid settings");

    // Alternate the height scale so every iteration is a real edit
    let mut flip = false;
    group.bench_function("octaves_256", |b| {
        b.iter(|| {
            flip = !flip;
            let next = TerrainSettings {
                height_scale: if flip { 12.0 } else { 8.0 },
                ..base
            };
            mesh.update_heights(black_box(&next))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: simplex sampling
// ---------------------------------------------------------------------------

fn bench_simplex(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplex");
    let noise = SimplexNoise2D::new(42);

    group.bench_function("noise2d", |b| {
        b.iter(|| black_box(noise.noise2d(black_box(12.34), black_box(-56.78))));
    });

    group.finish();
}

criterion_group!(benches, bench_regenerate, bench_update_heights, bench_simplex);
criterion_main!(benches);
