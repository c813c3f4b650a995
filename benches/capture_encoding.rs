// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use map_capture::capture::encode_png;
use map_capture::domain::snapshot::RasterFrame;
use map_capture::infrastructure::tiles::decode_tile;
use std::hint::black_box;

/// A 2× capture of the default 512×256 surface with some variation per pixel.
fn sample_frame() -> RasterFrame {
    let (width, height) = (1024u32, 512u32);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 251) as u8, (y % 241) as u8, ((x ^ y) % 239) as u8, 255]);
        }
    }
    RasterFrame::from_rgba(width, height, pixels).unwrap()
}

fn capture_encoding_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture_encoding");
    let frame = sample_frame();

    group.bench_function("encode_png_1024x512", |b| {
        b.iter(|| {
            let _ = black_box(encode_png(black_box(&frame)).unwrap());
        });
    });

    let png = encode_png(&frame).unwrap();
    group.bench_function("decode_tile_1024x512", |b| {
        b.iter(|| {
            let _ = black_box(decode_tile(black_box(png.data())).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, capture_encoding_benchmark);
criterion_main!(benches);
