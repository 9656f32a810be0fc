mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pattern_forge::prelude::*;

fn noise_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/noise");

    for &side in &common::SIDES {
        let rect = Rect::from_size(side, side);
        group.throughput(common::pixel_throughput(rect));

        let hash = HashNoise::new(7).with_bounds(rect);
        group.bench_with_input(BenchmarkId::new("hash", side), &side, |b, _| {
            b.iter(|| black_box(common::sweep(&hash, rect)));
        });

        let perlin = PerlinNoise::new(7)
            .with_bounds(rect)
            .with_frequency(0.03)
            .with_octaves(4);
        group.bench_with_input(BenchmarkId::new("perlin_fbm4", side), &side, |b, _| {
            b.iter(|| black_box(common::sweep(&perlin, rect)));
        });

        for metric in [WorleyMetric::Euclidean, WorleyMetric::Manhattan] {
            let worley = WorleyNoise::new(7)
                .with_bounds(rect)
                .with_frequency(0.05)
                .with_metric(metric);
            let id = BenchmarkId::new(format!("worley_{metric:?}").to_lowercase(), side);
            group.bench_with_input(id, &side, |b, _| {
                b.iter(|| black_box(common::sweep(&worley, rect)));
            });
        }
    }

    group.finish();
}

fn composite_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/composite");
    let rect = Rect::from_size(256, 256);
    group.throughput(common::pixel_throughput(rect));

    let brick = Brick::new().with_bounds(rect).with_seed(3);
    group.bench_function("brick", |b| {
        b.iter(|| black_box(common::sweep(&brick, rect)));
    });

    for (name, shape) in [
        ("road_straight", RoadShape::Straight),
        ("road_curved", RoadShape::Curved { radius: 90.0 }),
        ("road_intersection", RoadShape::Intersection),
    ] {
        let road = Road::new(shape).with_bounds(rect);
        group.bench_function(name, |b| {
            b.iter(|| black_box(common::sweep(&road, rect)));
        });
    }

    let globe = Globe::new().with_bounds(rect);
    group.bench_function("globe", |b| {
        b.iter(|| black_box(common::sweep(&globe, rect)));
    });

    let source = PerlinNoise::new(1).with_bounds(rect).shared();
    let edges = EdgeDetect::new(source.clone());
    group.bench_function("edge_detect", |b| {
        b.iter(|| black_box(common::sweep(&edges, rect)));
    });
    let occlusion = AmbientOcclusion::new(source.clone());
    group.bench_function("ambient_occlusion", |b| {
        b.iter(|| black_box(common::sweep(&occlusion, rect)));
    });

    let buffer = Buffer::new(source);
    buffer.refresh();
    group.bench_function("buffer_clean", |b| {
        b.iter(|| black_box(common::sweep(&buffer, rect)));
    });

    group.finish();
}

fn transform_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/transform");
    let rect = Rect::from_size(256, 256);
    group.throughput(common::pixel_throughput(rect));

    let tile_src = Checker::new(Color::BLACK, Color::WHITE)
        .with_space(4)
        .with_bounds(Rect::from_size(32, 32))
        .shared();
    let tiled = Tile::new(tile_src.clone(), rect);
    group.bench_function("tile", |b| {
        b.iter(|| black_box(common::sweep(&tiled, rect)));
    });

    let rotated = Tile::new(Rotate::new(tile_src.clone(), Rotation::Deg90).shared(), rect);
    group.bench_function("rotate90_tile", |b| {
        b.iter(|| black_box(common::sweep(&rotated, rect)));
    });

    let field = PerlinNoise::new(2).with_bounds(rect).shared();
    let warped = Tile::new(
        Warp::new(tile_src).with_uniform(field).with_magnitude(6.0).shared(),
        rect,
    );
    group.bench_function("warp", |b| {
        b.iter(|| black_box(common::sweep(&warped, rect)));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = noise_benches, composite_benches, transform_benches
}
criterion_main!(benches);
