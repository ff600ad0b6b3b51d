//! Procedural placement of the arena.
//!
//! Every random choice goes through a `StdRng` seeded from `MapSettings`, so
//! the same settings always produce the same objects in the same order.

use super::object::{MapObject, ObjectKind};
use crate::settings::MapSettings;
use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 1.0;
const PATCH_COUNT: usize = 5;
const TREE_MARGIN: f32 = 8.0;
const TREE_SPACING: f32 = 3.0;
const TREE_ATTEMPTS: u32 = 20;
/// Trees keep this far (on X/Z) from the arena centre so the spawn platform stays clear.
const TREE_CENTER_CLEARANCE: f32 = 8.0;
const PILLAR_RING_RADIUS: f32 = 4.5;
const FENCE_ATTEMPTS: usize = 8;
const FENCE_MARGIN: f32 = 6.0;
const FENCE_SPACING: f32 = 2.0;

/// Height of the ground plane, slightly below zero so patches sit on top.
pub const GROUND_Y: f32 = -0.1;
const PATCH_Y: f32 = -0.05;

/// A flat, purely visual square of stone on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPatch {
    pub center: Vec3,
    pub size: f32,
}

/// Everything the loader places, in placement order.
#[derive(Debug, Default, Clone)]
pub struct Layout {
    pub objects: Vec<MapObject>,
    pub patches: Vec<GroundPatch>,
}

impl Layout {
    fn too_close(&self, point: Vec3, min_distance: f32) -> bool {
        self.objects
            .iter()
            .any(|o| o.position().distance(point) < min_distance)
    }

    fn push(&mut self, kind: ObjectKind, position: Vec3, size: Vec3) {
        self.objects.push(MapObject::new(kind, position, size));
    }
}

/// Build the full arena for `settings`.
#[must_use]
pub fn generate(settings: &MapSettings) -> Layout {
    let mut layout = Layout::default();
    ground_patches(&mut layout, settings);
    perimeter_walls(&mut layout, settings.size);
    houses(&mut layout);
    trees(&mut layout, settings);
    structures(&mut layout);
    if settings.decorations {
        fences(&mut layout, settings);
    }
    layout
}

fn ground_patches(layout: &mut Layout, settings: &MapSettings) {
    let mut rng = StdRng::seed_from_u64(settings.patch_seed);
    let spread = settings.size - 10.0;
    for _ in 0..PATCH_COUNT {
        let x = rng.gen_range(-0.5f32..0.5) * spread;
        let z = rng.gen_range(-0.5f32..0.5) * spread;
        let size = rng.gen_range(3.0f32..7.0);
        layout.patches.push(GroundPatch {
            center: Vec3::new(x, PATCH_Y, z),
            size,
        });
    }
}

fn perimeter_walls(layout: &mut Layout, size: f32) {
    let half = size / 2.0;
    let y = WALL_HEIGHT / 2.0;
    let along_x = Vec3::new(size, WALL_HEIGHT, WALL_THICKNESS);
    let along_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, size);

    layout.push(ObjectKind::Wall, Vec3::new(0.0, y, half), along_x);
    layout.push(ObjectKind::Wall, Vec3::new(0.0, y, -half), along_x);
    layout.push(ObjectKind::Wall, Vec3::new(half, y, 0.0), along_z);
    layout.push(ObjectKind::Wall, Vec3::new(-half, y, 0.0), along_z);
}

fn houses(layout: &mut Layout) {
    // main house, two small ones, warehouse
    let houses = [
        (Vec3::new(-15.0, 2.5, -15.0), Vec3::new(8.0, 5.0, 10.0)),
        (Vec3::new(20.0, 2.0, 20.0), Vec3::new(5.0, 4.0, 6.0)),
        (Vec3::new(-20.0, 2.0, 15.0), Vec3::new(4.0, 4.0, 5.0)),
        (Vec3::new(15.0, 3.0, -20.0), Vec3::new(6.0, 6.0, 12.0)),
    ];
    for (position, size) in houses {
        layout.push(ObjectKind::House, position, size);
    }
}

fn trees(layout: &mut Layout, settings: &MapSettings) {
    let mut rng = StdRng::seed_from_u64(settings.tree_seed);
    let spread = settings.size - TREE_MARGIN;

    for _ in 0..settings.tree_count {
        let mut attempts = 0;
        let (x, z) = loop {
            let x = rng.gen_range(-0.5f32..0.5) * spread;
            let z = rng.gen_range(-0.5f32..0.5) * spread;
            attempts += 1;
            let spot = Vec3::new(x, 0.0, z);
            let taken = spot.length() < TREE_CENTER_CLEARANCE || layout.too_close(spot, TREE_SPACING);
            if !taken || attempts >= TREE_ATTEMPTS {
                break (x, z);
            }
        };

        let height = rng.gen_range(6.0f32..10.0);
        let width = rng.gen_range(0.8f32..1.4);
        layout.push(
            ObjectKind::Tree,
            Vec3::new(x, height / 2.0, z),
            Vec3::new(width, height, width),
        );
    }
}

fn structures(layout: &mut Layout) {
    layout.push(
        ObjectKind::Platform,
        Vec3::new(0.0, 3.5, 0.0),
        Vec3::new(10.0, 1.0, 10.0),
    );

    for i in 0..4u8 {
        let angle = (f32::from(i) * 90.0).to_radians();
        layout.push(
            ObjectKind::Pillar,
            Vec3::new(angle.cos() * PILLAR_RING_RADIUS, 2.0, angle.sin() * PILLAR_RING_RADIUS),
            Vec3::new(1.0, 4.0, 1.0),
        );
    }
}

fn fences(layout: &mut Layout, settings: &MapSettings) {
    let mut rng = StdRng::seed_from_u64(settings.decoration_seed);
    let spread = settings.size - FENCE_MARGIN;
    for _ in 0..FENCE_ATTEMPTS {
        let x = rng.gen_range(-0.5f32..0.5) * spread;
        let z = rng.gen_range(-0.5f32..0.5) * spread;
        if !layout.too_close(Vec3::new(x, 0.0, z), FENCE_SPACING) {
            layout.push(ObjectKind::Fence, Vec3::new(x, 1.0, z), Vec3::new(4.0, 2.0, 0.2));
        }
    }
}
