use criterion::{criterion_group, criterion_main, Criterion, black_box};

use terraplan::placement::{CollisionRegistry, Footprint, PlacementRequest, SearchParams};
use terraplan::terrain::{generate, TerrainConfig};

use glam::Vec3;

fn bench_generate_64(c: &mut Criterion) {
    let config = TerrainConfig::square(500.0, 64, 30.0, 1);

    c.bench_function("terrain_generate_64", |b| {
        b.iter(|| generate(black_box(&config)))
    });
}

fn bench_generate_128(c: &mut Criterion) {
    let config = TerrainConfig::square(500.0, 128, 30.0, 1);

    c.bench_function("terrain_generate_128", |b| {
        b.iter(|| generate(black_box(&config)))
    });
}

fn bench_find_valid_position(c: &mut Criterion) {
    let footprint = Footprint::from_size(Vec3::new(5.0, 10.0, 5.0));
    let mut registry = CollisionRegistry::new();
    // 10x10 grid of buildings with 1m gaps
    for i in 0..100u64 {
        let x = (i % 10) as f32 * 6.0;
        let z = (i / 10) as f32 * 6.0;
        registry.add(i, footprint, Vec3::new(x, 0.0, z));
    }
    let request = PlacementRequest {
        footprint,
        original_position: Vec3::new(-50.0, 0.0, -50.0),
        target: Vec3::new(27.0, 0.0, 27.0),
        exclude: None,
    };
    let search = SearchParams::default();

    c.bench_function("find_valid_position_100", |b| {
        b.iter(|| registry.find_valid_position(black_box(&request), &search))
    });
}

criterion_group!(benches, bench_generate_64, bench_generate_128, bench_find_valid_position);
criterion_main!(benches);
