//! Benchmarks for the heatmap rendering pipeline.
//!
//! Run with: cargo bench --package heatmap-renderer --bench heatmap_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heatmap_common::{BandSpec, DataType};
use heatmap_renderer::lut::GradientLut;
use heatmap_renderer::png;
use heatmap_renderer::{colorize, HeatmapLayer, LayerOptions, Sample, StampSprite};
use rand::Rng;

fn five_step() -> Vec<BandSpec> {
    vec![
        BandSpec::new("0-20", "#00f"),
        BandSpec::new("20-40", "#0ff"),
        BandSpec::new("40-60", "#0f0"),
        BandSpec::new("60-80", "#ff0"),
        BandSpec::new("80-100", "#f00"),
    ]
}

/// Random samples scattered over the frame with weights in 0..100.
fn generate_samples(count: usize, width: usize, height: usize) -> Vec<Sample> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            Sample::weighted(
                rng.gen_range(0.0..width as f64),
                rng.gen_range(0.0..height as f64),
                rng.gen_range(0.0..100.0),
            )
        })
        .collect()
}

/// Accumulated alpha covering the full 0..=255 range.
fn generate_alpha_buffer(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| [0u8, 0, 0, (i % 256) as u8])
        .collect()
}

// =============================================================================
// LOOKUP TABLE BENCHMARKS
// =============================================================================

fn bench_lut_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut_build");

    let two = vec![BandSpec::new("0-50", "#00f"), BandSpec::new("50-100", "#f00")];
    let five = five_step();
    let many: Vec<BandSpec> = (0..64)
        .map(|i| BandSpec::new(format!("{}-{}", i * 10, i * 10 + 9), "#808080"))
        .collect();

    for (name, bands) in [("2_bands", &two), ("5_bands", &five), ("64_bands", &many)] {
        group.bench_function(name, |b| {
            b.iter(|| GradientLut::from_specs(black_box(bands)).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// STAMP BENCHMARKS
// =============================================================================

fn bench_stamp_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp_generation");

    for (radius, blur) in [(4.0, 4.0), (8.0, 15.0), (20.0, 30.0)] {
        group.bench_with_input(
            BenchmarkId::new("sprite", format!("r{}_b{}", radius, blur)),
            &(radius, blur),
            |b, &(radius, blur)| {
                b.iter(|| StampSprite::generate(black_box(radius), black_box(blur), 250.0).unwrap());
            },
        );
    }

    let sprite = StampSprite::generate(8.0, 15.0, 250.0).unwrap();
    group.bench_function("bake_opacity", |b| {
        b.iter(|| sprite.with_opacity(black_box(127)));
    });

    group.finish();
}

// =============================================================================
// COLORIZE BENCHMARKS
// =============================================================================

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");
    let lut = GradientLut::from_specs(&five_step()).unwrap();

    for size in [64, 256, 512, 1024] {
        let pixels = generate_alpha_buffer(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pixels, |b, pixels| {
            b.iter_batched(
                || pixels.clone(),
                |mut buffer| {
                    colorize(&mut buffer, &lut);
                    buffer
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// FULL PIPELINE BENCHMARKS
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for count in [100, 1_000, 10_000] {
        let samples = generate_samples(count, 512, 512);
        let mut layer =
            HeatmapLayer::new(LayerOptions::new(five_step(), DataType::Value)).unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("512x512", count), &samples, |b, samples| {
            b.iter(|| layer.render(512, 512, black_box(samples)).unwrap());
        });
    }

    group.finish();
}

fn bench_render_and_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_and_encode");
    let samples = generate_samples(1_000, 256, 256);
    let mut layer = HeatmapLayer::new(LayerOptions::new(five_step(), DataType::Value)).unwrap();
    let frame = layer.render(256, 256, &samples).unwrap();

    group.bench_function("png_rgba_256", |b| {
        b.iter(|| png::encode_rgba(black_box(&frame.pixels), 256, 256).unwrap());
    });
    group.bench_function("png_auto_256", |b| {
        b.iter(|| png::encode_auto(black_box(&frame.pixels), 256, 256).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lut_build,
    bench_stamp_generation,
    bench_colorize,
    bench_render,
    bench_render_and_encode
);
criterion_main!(benches);
