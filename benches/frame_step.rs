//! Frame-step throughput for the three rendering strategies.
//!
//! This is the comparison the engine exists for: how much does blitting a
//! pre-rasterized sprite save over rasterizing every circle per frame, and
//! what does per-particle sprite ownership cost on top.
//!
//! Run with: `cargo bench`

use bobble::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn scene_with(offscreen: bool, multi: bool) -> Scene<PixelSurface> {
    Scene::with_config(
        PixelSurface::new(800, 500),
        SceneConfig {
            offscreen_rendering: offscreen,
            multi_sprite_instances: multi,
            ..Default::default()
        },
        Box::new(ManualScheduler::new()),
        Box::new(|_| {}),
    )
}

fn bench_frame_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_step_1000_particles");

    group.bench_function("direct_draw", |b| {
        let mut scene = scene_with(false, false);
        b.iter(|| {
            scene.tick();
            black_box(scene.surface().data().first());
        })
    });

    group.bench_function("shared_sprite", |b| {
        let mut scene = scene_with(true, false);
        b.iter(|| {
            scene.tick();
            black_box(scene.surface().data().first());
        })
    });

    group.bench_function("sprite_per_particle", |b| {
        let mut scene = scene_with(true, true);
        b.iter(|| {
            scene.tick();
            black_box(scene.surface().data().first());
        })
    });

    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset_1000_particles");

    group.bench_function("shared_sprite", |b| {
        let mut scene = scene_with(true, false);
        b.iter(|| scene.set_particle_count(black_box(1000)))
    });

    group.bench_function("sprite_per_particle", |b| {
        let mut scene = scene_with(true, true);
        b.iter(|| scene.set_particle_count(black_box(1000)))
    });

    group.finish();
}

criterion_group!(benches, bench_frame_step, bench_reset);
criterion_main!(benches);
