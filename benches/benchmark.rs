use bevy::math::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shooter3d::map::{CollisionWorld, Map};
use shooter3d::player::{LookAxis, MoveDirection, PlayerController, PlayerTuning};
use shooter3d::settings::MapSettings;

/// Deterministic points spread over the arena.
fn probe_points(count: usize) -> Vec<Vec3> {
    let mut state: u32 = 0x1234_5678;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        ((state >> 16) & 0x7fff) as f32 / 32767.0
    };
    (0..count)
        .map(|_| Vec3::new(next() * 64.0 - 32.0, next() * 8.0, next() * 64.0 - 32.0))
        .collect()
}

fn bench_map_load(c: &mut Criterion) {
    let settings = MapSettings::default();
    c.bench_function("map_load", |b| b.iter(|| black_box(Map::load(black_box(&settings)))));
}

fn bench_collision_queries(c: &mut Criterion) {
    let map = Map::load(&MapSettings::default());
    let points = probe_points(1_000);
    c.bench_function("collision_queries", |b| {
        b.iter(|| {
            let valid = points
                .iter()
                .filter(|p| map.is_position_valid(black_box(**p), 1.0))
                .count();
            black_box(valid)
        })
    });
}

fn bench_ground_queries(c: &mut Criterion) {
    let map = Map::load(&MapSettings::default());
    let points = probe_points(1_000);
    c.bench_function("ground_queries", |b| {
        b.iter(|| {
            let sum: f32 = points.iter().map(|p| map.ground_height_at(black_box(*p))).sum();
            black_box(sum)
        })
    });
}

/// One second of play at 60 Hz, walking and turning across the arena.
fn bench_controller_ticks(c: &mut Criterion) {
    let map = Map::load(&MapSettings::default());
    c.bench_function("controller_ticks", |b| {
        b.iter(|| {
            let mut player = PlayerController::spawn_on(&map, PlayerTuning::default());
            player.on_move_input(MoveDirection::Forward, true);
            player.on_move_input(MoveDirection::StrafeRight, true);
            for i in 0..60 {
                if i % 20 == 0 {
                    player.on_jump_input(true);
                }
                player.on_look_input(LookAxis::Yaw, 0.01);
                player.update(&map, black_box(1.0 / 60.0));
            }
            black_box(player.position())
        })
    });
}

/// Large alternating look deltas to exercise the pitch clamp.
fn bench_look_clamp(c: &mut Criterion) {
    c.bench_function("look_clamp", |b| {
        b.iter(|| {
            let mut player = PlayerController::new(Vec3::ZERO, PlayerTuning::default());
            for i in 0..1_000usize {
                let d = if (i & 1) == 0 { 1.0 } else { -0.6 };
                player.on_look_input(LookAxis::Yaw, black_box(d));
                player.on_look_input(LookAxis::Pitch, black_box(d));
            }
            black_box((player.yaw(), player.pitch()))
        })
    });
}

criterion_group!(
    benches,
    bench_map_load,
    bench_collision_queries,
    bench_ground_queries,
    bench_controller_ticks,
    bench_look_clamp
);
criterion_main!(benches);
