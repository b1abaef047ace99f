//! Benchmarks for imgfx operations.
//!
//! Run with: `cargo bench -p imgfx-bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use imgfx_color::{hsl_to_rgb, rgb_to_hsl};
use imgfx_bench::test_image;
use imgfx_ops::adjust::{self, GrayMethod, VignetteOptions};
use imgfx_ops::filter::{self, GaussianKernel, KernelCache, DEFAULT_SIGMA};
use imgfx_ops::parallel;

/// Naive vs separable vs row-parallel blur across radii.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");
    let image = test_image(256, 256).unwrap();
    group.throughput(Throughput::Elements(image.pixel_count() as u64));

    for radius in [1, 3, 6] {
        group.bench_with_input(BenchmarkId::new("naive", radius), &radius, |b, &r| {
            b.iter(|| filter::blur(black_box(&image), r, DEFAULT_SIGMA).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("separable", radius), &radius, |b, &r| {
            b.iter(|| filter::blur_separable(black_box(&image), r, DEFAULT_SIGMA).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("parallel", radius), &radius, |b, &r| {
            b.iter(|| parallel::blur(black_box(&image), r, DEFAULT_SIGMA).unwrap())
        });
    }

    group.finish();
}

/// Kernel construction vs cache lookup.
fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel");

    for radius in [3, 10, 25] {
        group.bench_with_input(BenchmarkId::new("build", radius), &radius, |b, &r| {
            b.iter(|| GaussianKernel::new(black_box(r), DEFAULT_SIGMA).unwrap())
        });
    }

    let mut cache = KernelCache::new();
    group.bench_function("cached_25", |b| {
        b.iter(|| cache.get(black_box(25), DEFAULT_SIGMA).unwrap().radius())
    });

    group.finish();
}

/// Per-pixel adjustments on a 512x512 buffer.
fn bench_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjust");
    let image = test_image(512, 512).unwrap();
    group.throughput(Throughput::Elements(image.pixel_count() as u64));

    group.bench_function("brightness", |b| {
        b.iter_batched_ref(
            || image.clone(),
            |img| {
                adjust::set_brightness(img, black_box(20.0));
            },
            criterion::BatchSize::LargeInput,
        )
    });

    group.bench_function("contrast_average", |b| {
        b.iter_batched_ref(
            || image.clone(),
            |img| {
                adjust::set_contrast(img, black_box(30.0), true);
            },
            criterion::BatchSize::LargeInput,
        )
    });

    group.bench_function("vignette", |b| {
        b.iter_batched_ref(
            || image.clone(),
            |img| adjust::vignette(img, VignetteOptions::default()).map(|_| ()).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });

    group.bench_function("gray_weighted", |b| {
        b.iter_batched_ref(
            || image.clone(),
            |img| {
                adjust::grayscale(img, GrayMethod::Weighted);
            },
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

/// HSL round trip on 10k triplets.
fn bench_hsl(c: &mut Criterion) {
    let mut group = c.benchmark_group("hsl");
    let pixels: Vec<(u8, u8, u8)> = (0..10000u32)
        .map(|i| (i as u8, (i >> 3) as u8, (i >> 6) as u8))
        .collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    group.bench_function("round_trip", |b| {
        b.iter(|| {
            pixels
                .iter()
                .map(|&(r, g, bl)| {
                    let (h, s, l) = rgb_to_hsl(black_box(r), g, bl);
                    hsl_to_rgb(h, s, l)
                })
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_blur, bench_kernel, bench_adjust, bench_hsl);
criterion_main!(benches);
