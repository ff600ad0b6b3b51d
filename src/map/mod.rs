//! The arena: static objects, bounds and collision queries.
//!
//! `Map` is loaded once per game session from `MapSettings` and answers the
//! two questions the player controller asks every tick: may I stand here, and
//! how high is the ground under me. Both queries are linear scans over the
//! object list, which is fine for the few dozen objects the arena holds.
//!
//! # Example:
//!
//! ```
//! use shooter3d::map::{CollisionWorld, Map};
//! use shooter3d::settings::MapSettings;
//! use bevy::math::Vec3;
//!
//! let map = Map::load(&MapSettings::default());
//! assert_eq!(map.ground_height_at(Vec3::new(0.0, 7.0, 0.0)), 4.0);
//! assert!(map.is_position_valid(Vec3::new(0.0, 5.0, 0.0), 1.0));
//! ```

pub mod layout;
pub mod object;

use bevy::log::info;
use bevy::math::Vec3;
use bevy::prelude::Resource;

pub use layout::GroundPatch;
pub use object::{MapObject, ObjectKind};

use crate::settings::MapSettings;

/// Height of the bare ground.
pub const GROUND_LEVEL: f32 = 0.0;

/// What the player controller needs from the world it moves in.
pub trait CollisionWorld {
    /// True if a square footprint of `entity_width` centred on `position`
    /// touches neither the world bounds nor any obstacle.
    fn is_position_valid(&self, position: Vec3, entity_width: f32) -> bool;

    /// Height of the walkable surface under `position`.
    fn ground_height_at(&self, position: Vec3) -> f32;
}

/// Endless flat ground without obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl Default for FlatGround {
    fn default() -> Self {
        Self { height: GROUND_LEVEL }
    }
}

impl CollisionWorld for FlatGround {
    fn is_position_valid(&self, _position: Vec3, _entity_width: f32) -> bool {
        true
    }

    fn ground_height_at(&self, _position: Vec3) -> f32 {
        self.height
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Map {
    size: f32,
    spawn: Vec3,
    objects: Vec<MapObject>,
    patches: Vec<GroundPatch>,
    debug_mode: bool,
    loaded: bool,
}

impl Map {
    /// Generate and load the arena described by `settings`.
    #[must_use]
    pub fn load(settings: &MapSettings) -> Self {
        let layout = layout::generate(settings);
        info!(
            "map loaded: {} objects, {} ground patches, size {}",
            layout.objects.len(),
            layout.patches.len(),
            settings.size
        );
        Self {
            size: settings.size,
            spawn: Vec3::from_array(settings.spawn),
            objects: layout.objects,
            patches: layout.patches,
            debug_mode: settings.debug_collision,
            loaded: true,
        }
    }

    /// Build a map from an explicit object list, skipping procedural layout.
    #[must_use]
    pub fn from_objects(size: f32, spawn: Vec3, objects: Vec<MapObject>) -> Self {
        Self {
            size,
            spawn,
            objects,
            patches: Vec::new(),
            debug_mode: false,
            loaded: true,
        }
    }

    /// Drop every object. Returns `false` if there was nothing to unload.
    pub fn unload(&mut self) -> bool {
        if !self.loaded {
            return false;
        }
        self.objects.clear();
        self.patches.clear();
        self.loaded = false;
        info!("map unloaded");
        true
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Test a point with a radius against the bounds and every object.
    #[must_use]
    pub fn check_collision(&self, position: Vec3, radius: f32) -> bool {
        let half = self.size / 2.0;
        if position.x - radius < -half
            || position.x + radius > half
            || position.z - radius < -half
            || position.z + radius > half
        {
            return true;
        }

        self.objects.iter().any(|o| o.check_collision(position, radius))
    }

    #[must_use]
    pub fn player_spawn_position(&self) -> Vec3 {
        self.spawn
    }

    /// Objects in placement order.
    #[must_use]
    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    #[must_use]
    pub fn patches(&self) -> &[GroundPatch] {
        &self.patches
    }

    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[must_use]
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    #[must_use]
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind() == kind).count()
    }
}

impl CollisionWorld for Map {
    fn is_position_valid(&self, position: Vec3, entity_width: f32) -> bool {
        debug_assert!(self.loaded, "collision query on an unloaded map");
        !self.check_collision(position, entity_width / 2.0)
    }

    fn ground_height_at(&self, position: Vec3) -> f32 {
        debug_assert!(self.loaded, "ground query on an unloaded map");
        self.objects
            .iter()
            .filter_map(|o| o.ground_height_at(position))
            .fold(GROUND_LEVEL, f32::max)
    }
}
