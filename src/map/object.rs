//! Static map objects and their axis-aligned collision boxes.
//!
//! A `MapObject` is a tagged box: the `ObjectKind` only changes how the
//! object looks (see `scene::visual`) and, for platforms, how the top
//! surface is treated by collision and ground queries.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Lowest height above a platform's top at which a point is considered to be
/// standing on it instead of being blocked by it.
pub const PLATFORM_STAND_BELOW: f32 = 0.5;
/// Highest height above a platform's top that still counts as standing on it.
pub const PLATFORM_STAND_ABOVE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Wall,
    House,
    Tree,
    Platform,
    Pillar,
    Fence,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::Wall,
        ObjectKind::House,
        ObjectKind::Tree,
        ObjectKind::Platform,
        ObjectKind::Pillar,
        ObjectKind::Fence,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Wall => "Wall",
            ObjectKind::House => "House",
            ObjectKind::Tree => "Tree",
            ObjectKind::Platform => "Platform",
            ObjectKind::Pillar => "Pillar",
            ObjectKind::Fence => "Fence",
        }
    }
}

/// One static volume of the map.
///
/// `position` is the centre of the box and `size` its full extents, so the
/// box spans `position ± size / 2` on every axis. Objects never rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapObject {
    kind: ObjectKind,
    position: Vec3,
    size: Vec3,
}

impl MapObject {
    #[must_use]
    pub fn new(kind: ObjectKind, position: Vec3, size: Vec3) -> Self {
        Self { kind, position, size }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.size
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    /// Corners of the collision box as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let half = self.half_extents();
        (self.position - half, self.position + half)
    }

    /// Height of the top face. Only meaningful as ground for platforms.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }

    /// Test a point with a radius against this object's box.
    ///
    /// The X/Z footprint is tested first. A platform never blocks a point
    /// that sits in the band from just below its top to a little above it,
    /// which lets the player stand on it. Everything else also needs a Y
    /// overlap to collide.
    #[must_use]
    pub fn check_collision(&self, point: Vec3, radius: f32) -> bool {
        let half = self.half_extents();
        let delta = point - self.position;

        let horizontal = delta.x.abs() < half.x + radius && delta.z.abs() < half.z + radius;
        if !horizontal {
            return false;
        }

        if self.kind == ObjectKind::Platform {
            let top = self.top();
            if point.y >= top - PLATFORM_STAND_BELOW && point.y <= top + PLATFORM_STAND_ABOVE {
                return false;
            }
        }

        delta.y.abs() < half.y + radius
    }

    /// Top surface height under `point`, if this is a platform whose
    /// footprint (edges included) contains the point's X/Z.
    #[must_use]
    pub fn ground_height_at(&self, point: Vec3) -> Option<f32> {
        if self.kind != ObjectKind::Platform {
            return None;
        }
        let half = self.half_extents();
        let over = (point.x - self.position.x).abs() <= half.x
            && (point.z - self.position.z).abs() <= half.z;
        over.then(|| self.top())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> MapObject {
        MapObject::new(ObjectKind::Platform, Vec3::new(0.0, 3.5, 0.0), Vec3::new(10.0, 1.0, 10.0))
    }

    #[test]
    fn far_point_does_not_collide() {
        let wall = MapObject::new(ObjectKind::Wall, Vec3::new(0.0, 2.0, 30.0), Vec3::new(60.0, 4.0, 1.0));
        assert!(!wall.check_collision(Vec3::new(0.0, 2.0, 25.0), 0.5));
    }

    #[test]
    fn overlap_needs_all_three_axes() {
        let house = MapObject::new(ObjectKind::House, Vec3::new(0.0, 2.0, 0.0), Vec3::new(4.0, 4.0, 4.0));
        assert!(house.check_collision(Vec3::new(2.4, 1.0, 0.0), 0.5));
        // above the roof: X/Z overlap but no Y overlap
        assert!(!house.check_collision(Vec3::new(0.0, 5.0, 0.0), 0.5));
        // touching exactly is not overlapping
        assert!(!house.check_collision(Vec3::new(2.5, 1.0, 0.0), 0.5));
    }

    #[test]
    fn platform_top_band_is_carved_out() {
        let p = platform();
        for y in [3.5, 4.0, 5.0, 6.0] {
            assert!(!p.check_collision(Vec3::new(1.0, y, 1.0), 0.5), "y = {y}");
        }
        // just under the band still hits the slab
        assert!(p.check_collision(Vec3::new(1.0, 3.4, 1.0), 0.5));
    }

    #[test]
    fn carve_out_only_applies_to_platforms() {
        let pillar = MapObject::new(ObjectKind::Pillar, Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 4.0, 1.0));
        assert!(pillar.check_collision(Vec3::new(0.0, 3.8, 0.0), 0.5));
    }

    #[test]
    fn ground_height_only_from_platforms() {
        assert_eq!(platform().ground_height_at(Vec3::new(5.0, 0.0, -5.0)), Some(4.0));
        assert_eq!(platform().ground_height_at(Vec3::new(5.1, 0.0, 0.0)), None);

        let wall = MapObject::new(ObjectKind::Wall, Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(wall.ground_height_at(Vec3::ZERO), None);
    }

    #[test]
    fn bounds_span_half_size_each_way() {
        let (min, max) = platform().bounds();
        assert_eq!(min, Vec3::new(-5.0, 3.0, -5.0));
        assert_eq!(max, Vec3::new(5.0, 4.0, 5.0));
    }
}
