#![allow(clippy::unwrap_used)]
//! Benchmarks for sprite rendering: trim, fit and the collapsed view

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use deskmate::assets::render::{collapse_view, fit_into, trim_transparent};
use deskmate::assets::{AssetCatalog, CatalogOptions, RenderOptions, SpriteKey, SpriteRenderer};
use deskmate::character::{Edge, Pose, Size};
use image::{Rgba, RgbaImage};
use std::hint::black_box;

/// Opaque figure centered on a transparent canvas, like a typical sprite
fn create_sprite() -> RgbaImage {
    let mut image = RgbaImage::new(600, 1000);
    for y in 100..900 {
        for x in 150..450 {
            image.put_pixel(x, y, Rgba([220, 180, 160, 255]));
        }
    }
    image
}

fn bench_pipeline_steps(c: &mut Criterion) {
    let sprite = create_sprite();
    let trimmed = trim_transparent(&sprite);
    let fitted = fit_into(&trimmed, Size::new(300, 500));

    c.bench_function("trim_transparent", |b| {
        b.iter(|| black_box(trim_transparent(black_box(&sprite))));
    });

    c.bench_function("fit_into_300x500", |b| {
        b.iter(|| black_box(fit_into(black_box(&trimmed), Size::new(300, 500))));
    });

    c.bench_function("collapse_view_right", |b| {
        b.iter(|| black_box(collapse_view(black_box(&fitted), 0.33, Edge::Right)));
    });
}

fn bench_renderer(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let sprite = create_sprite();
    sprite.save(dir.path().join("base.png")).unwrap();
    sprite.save(dir.path().join("base_blush.png")).unwrap();
    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
    let options = RenderOptions {
        sprite_size: Size::new(300, 500),
        collapsed_fraction: 0.33,
    };
    let key = SpriteKey {
        pose: Pose::Collapsed,
        expression: "blush".to_string(),
        edge: Edge::Left,
    };

    c.bench_function("render_uncached", |b| {
        b.iter(|| {
            let mut renderer = SpriteRenderer::new(options);
            black_box(renderer.render(&catalog, black_box(&key)));
        });
    });

    let mut renderer = SpriteRenderer::new(options);
    renderer.preload(&catalog);
    c.bench_function("render_cached", |b| {
        b.iter(|| black_box(renderer.render(&catalog, black_box(&key))));
    });
}

criterion_group!(benches, bench_pipeline_steps, bench_renderer);
criterion_main!(benches);
