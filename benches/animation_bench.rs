//! Per-frame animation and instance collection costs.

// `criterion_group!` expands to an undocumented `pub fn`.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voxel_morph::animation::{AnimationController, EasingFunction};
use voxel_morph::options::AnimationOptions;
use voxel_morph::renderer::collect_instances;
use voxel_morph::voxel::{Voxel, VoxelStore};

fn cube(side: i32, color: u32) -> Vec<Voxel> {
    let mut voxels = Vec::new();
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                voxels.push(Voxel::new(x, y, z, color));
            }
        }
    }
    voxels
}

fn seeded() -> AnimationController {
    AnimationController::new(AnimationOptions {
        seed: Some(7),
        ..AnimationOptions::default()
    })
}

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
    c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))));
    });
}

fn dismantle_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dismantle_tick");
    for side in [8, 16, 24] {
        let voxels = cube(side, 0xFF_8800);
        group.bench_function(format!("{}_voxels", voxels.len()), |b| {
            let mut controller = seeded();
            controller.start_dismantle(&voxels);
            b.iter(|| black_box(controller.advance(black_box(1.0 / 60.0))));
        });
    }
    group.finish();
}

fn rebuild_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_tick");
    for side in [8, 16, 24] {
        let source = cube(side, 0xFF_8800);
        let target: Vec<Voxel> = source
            .iter()
            .map(|v| Voxel::new(v.x, v.y + side, v.z, 0x00_88FF))
            .collect();
        group.bench_function(format!("{}_voxels", source.len()), |b| {
            let mut controller = seeded();
            controller.start_dismantle(&source);
            let _ = controller.start_rebuild(&target);
            b.iter(|| black_box(controller.advance(black_box(1.0 / 240.0))));
        });
    }
    group.finish();
}

fn collect_instances_benchmark(c: &mut Criterion) {
    let mut store = VoxelStore::new();
    let _ = store.replace_all(&cube(32, 0x33_CC33));
    let controller = seeded();
    let mut out = Vec::new();
    c.bench_function("collect_instances_32k", |b| {
        b.iter(|| {
            collect_instances(&store, &controller, 0.96, &mut out);
            black_box(out.len())
        });
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    dismantle_tick_benchmark,
    rebuild_tick_benchmark,
    collect_instances_benchmark,
);
criterion_main!(benches);
