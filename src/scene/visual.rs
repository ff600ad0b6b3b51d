//! What each kind of thing looks like.
//!
//! Visuals are built from the object's size alone; they never feed back into
//! collision, which always uses the object's full box.

use bevy::math::{Vec2, Vec3};

use super::{Shape, Visual, VisualPart};
use crate::map::{MapObject, ObjectKind};

const BRICK: [f32; 4] = [0.7, 0.4, 0.3, 1.0];
const OFF_WHITE: [f32; 4] = [0.9, 0.9, 0.8, 1.0];
const DARK_RED: [f32; 4] = [0.5, 0.2, 0.2, 1.0];
const BARK: [f32; 4] = [0.4, 0.2, 0.1, 1.0];
const FOLIAGE: [f32; 4] = [0.1, 0.6, 0.1, 1.0];
const STONE: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
const MARBLE: [f32; 4] = [0.95, 0.95, 0.9, 1.0];
const WOOD: [f32; 4] = [0.6, 0.4, 0.2, 1.0];
const GRASS: [f32; 4] = [0.3, 0.6, 0.2, 1.0];
const PATCH_GREY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const PLAYER_RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const TEST_BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

const ROOF_OVERHANG: f32 = 0.4;
const ROOF_THICKNESS: f32 = 0.6;

#[must_use]
pub fn object_visual(object: &MapObject) -> Visual {
    let size = object.size();
    let footprint = size.x.min(size.z);
    match object.kind() {
        ObjectKind::Wall => Visual::single("Wall", Shape::Cuboid { size }, BRICK),
        ObjectKind::House => Visual::single("House Walls", Shape::Cuboid { size }, OFF_WHITE).with_part(VisualPart {
            name: "Roof",
            shape: Shape::Cuboid {
                size: Vec3::new(size.x + ROOF_OVERHANG, ROOF_THICKNESS, size.z + ROOF_OVERHANG),
            },
            offset: Vec3::new(0.0, size.y / 2.0 + ROOF_THICKNESS / 2.0, 0.0),
            color: DARK_RED,
        }),
        ObjectKind::Tree => {
            let foliage = footprint * 1.6;
            Visual {
                parts: vec![
                    VisualPart {
                        name: "Tree Trunk",
                        shape: Shape::Cylinder {
                            radius: footprint * 0.3,
                            height: size.y * 0.7,
                        },
                        offset: Vec3::new(0.0, size.y * 0.35 - size.y / 2.0, 0.0),
                        color: BARK,
                    },
                    VisualPart {
                        name: "Tree Foliage",
                        shape: Shape::Cuboid { size: Vec3::splat(foliage) },
                        offset: Vec3::new(0.0, size.y * 0.7 - size.y / 2.0, 0.0),
                        color: FOLIAGE,
                    },
                ],
            }
        }
        ObjectKind::Platform => Visual::single("Platform", Shape::Cuboid { size }, STONE),
        ObjectKind::Pillar => Visual::single(
            "Pillar",
            Shape::Cylinder {
                radius: footprint / 2.0,
                height: size.y,
            },
            MARBLE,
        ),
        ObjectKind::Fence => Visual::single("Fence", Shape::Cuboid { size }, WOOD),
    }
}

/// Red box of the player's footprint and height.
#[must_use]
pub fn player_visual(width: f32, height: f32) -> Visual {
    Visual::single(
        "Player Box",
        Shape::Cuboid {
            size: Vec3::new(width, height, width),
        },
        PLAYER_RED,
    )
}

#[must_use]
pub fn ground_visual(map_size: f32) -> Visual {
    Visual::single("Ground", Shape::Quad { size: Vec2::splat(map_size) }, GRASS)
}

#[must_use]
pub fn patch_visual(size: f32) -> Visual {
    Visual::single("Stone Patch", Shape::Quad { size: Vec2::splat(size) }, PATCH_GREY)
}

/// The blue cube shown behind the main menu.
#[must_use]
pub fn test_cube_visual() -> Visual {
    Visual::single("Box", Shape::Cuboid { size: Vec3::splat(2.0) }, TEST_BLUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_has_overhanging_roof_on_top() {
        let house = MapObject::new(ObjectKind::House, Vec3::ZERO, Vec3::new(8.0, 5.0, 10.0));
        let visual = object_visual(&house);
        assert_eq!(visual.parts.len(), 2);
        let roof = &visual.parts[1];
        assert_eq!(roof.shape, Shape::Cuboid { size: Vec3::new(8.4, 0.6, 10.4) });
        assert!((roof.offset.y - 2.8).abs() < 1e-5);
        assert_eq!(roof.color, DARK_RED);
    }

    #[test]
    fn tree_trunk_sits_low_and_foliage_high() {
        let tree = MapObject::new(ObjectKind::Tree, Vec3::ZERO, Vec3::new(1.0, 8.0, 1.0));
        let visual = object_visual(&tree);
        let trunk = &visual.parts[0];
        let foliage = &visual.parts[1];
        assert_eq!(trunk.shape, Shape::Cylinder { radius: 0.3, height: 8.0 * 0.7 });
        assert!(trunk.offset.y < 0.0);
        assert!(foliage.offset.y > 0.0);
        assert_eq!(foliage.shape, Shape::Cuboid { size: Vec3::splat(1.6) });
    }

    #[test]
    fn single_part_kinds() {
        for kind in [ObjectKind::Wall, ObjectKind::Platform, ObjectKind::Pillar, ObjectKind::Fence] {
            let object = MapObject::new(kind, Vec3::ZERO, Vec3::new(1.0, 4.0, 1.0));
            assert_eq!(object_visual(&object).parts.len(), 1, "{kind:?}");
        }
    }

    #[test]
    fn player_box_matches_footprint() {
        let visual = player_visual(1.0, 2.0);
        assert_eq!(visual.parts[0].shape, Shape::Cuboid { size: Vec3::new(1.0, 2.0, 1.0) });
        assert_eq!(visual.parts[0].color, PLAYER_RED);
    }
}
