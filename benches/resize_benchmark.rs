use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageBuffer, Rgb};
use jpgscale::{compute_target_size, FilterType, ImageResizer};

fn benchmark_target_size(c: &mut Criterion) {
    c.bench_function("compute_target_size", |b| {
        b.iter(|| compute_target_size(black_box(4032), black_box(3024), black_box(37.5)))
    });
}

fn benchmark_resize(c: &mut Criterion) {
    let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(1024, 768, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }));

    let mut group = c.benchmark_group("resize_50_percent");
    for filter in [FilterType::Nearest, FilterType::Triangle, FilterType::CatmullRom, FilterType::Lanczos3] {
        let resizer = ImageResizer::with_filter(filter);
        group.bench_function(format!("{:?}", filter), |b| {
            b.iter(|| resizer.resize(black_box(image.clone()), 50.0))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_target_size, benchmark_resize);
criterion_main!(benches);
