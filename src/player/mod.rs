//! Player controller: state, tuning, input handling and the per-tick update.
//!
//! `PlayerController` owns everything about the player and nothing about the
//! engine. Input arrives as plain calls (`on_move_input`, `on_jump_input`,
//! `on_look_input`), `update` integrates one tick against any
//! `CollisionWorld`, and `publish_view` hands the camera placement to a
//! `ViewSink`. The Bevy systems in the submodules only translate engine
//! events into those calls.
//!
//! # Example:
//!
//! ```
//! use shooter3d::map::FlatGround;
//! use shooter3d::player::{MoveDirection, PlayerController, PlayerTuning};
//! use bevy::math::Vec3;
//!
//! let mut player = PlayerController::new(Vec3::new(0.0, 1.0, 0.0), PlayerTuning::default());
//! player.on_move_input(MoveDirection::Forward, true);
//! player.update(&FlatGround::default(), 0.1);
//! assert!(player.position().z < 0.0);
//! ```
pub mod camera;
pub mod input;
pub mod movement;
pub mod physics;

use bevy::math::Vec3;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use camera::*;
pub use input::*;
pub use movement::*;
pub use physics::*;

use crate::map::{CollisionWorld, Map};
use crate::scene::SceneGraph;

/// Physical and look tuning of the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed per held direction, in units per second.
    pub move_speed: f32,
    /// Vertical speed given by a jump.
    pub jump_speed: f32,
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
    pub height: f32,
    /// Side of the square collision footprint.
    pub width: f32,
    /// Multiplier applied to analog look input.
    pub mouse_sensitivity: f32,
    /// Pitch limit in degrees, applied symmetrically up and down.
    pub max_pitch_deg: f32,
    /// Camera position relative to the player before rotation.
    pub camera_offset: [f32; 3],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            jump_speed: 15.0,
            gravity: -30.0,
            height: 2.0,
            width: 1.0,
            mouse_sensitivity: 2.0,
            max_pitch_deg: 25.0,
            camera_offset: [0.0, 2.5, 5.0],
        }
    }
}

impl PlayerTuning {
    #[must_use]
    pub fn max_pitch(&self) -> f32 {
        self.max_pitch_deg.to_radians()
    }
}

/// Kinematic state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    /// Centre of the player's box in world space.
    pub position: Vec3,
    /// Only `y` is integrated; horizontal motion is applied directly.
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

/// The player. One per game session.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    state: PlayerState,
    tuning: PlayerTuning,
    moves: MoveFlags,
}

impl PlayerController {
    /// Create a player at `spawn`, airborne and at rest.
    #[must_use]
    pub fn new(spawn: Vec3, tuning: PlayerTuning) -> Self {
        Self {
            state: PlayerState {
                position: spawn,
                ..PlayerState::default()
            },
            tuning,
            moves: MoveFlags::default(),
        }
    }

    /// Create a player at the map's spawn point.
    #[must_use]
    pub fn spawn_on(map: &Map, tuning: PlayerTuning) -> Self {
        Self::new(map.player_spawn_position(), tuning)
    }

    #[must_use]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[must_use]
    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Swap the tuning, e.g. after a settings reload. The pitch is re-clamped
    /// to the new limit.
    pub fn set_tuning(&mut self, tuning: PlayerTuning) {
        self.tuning = tuning;
        let max = tuning.max_pitch();
        self.state.pitch = self.state.pitch.clamp(-max, max);
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.state.yaw
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.state.pitch
    }

    #[must_use]
    pub fn on_ground(&self) -> bool {
        self.state.on_ground
    }

    #[must_use]
    pub fn moves(&self) -> &MoveFlags {
        &self.moves
    }

    /// Record a movement key going down or up. Last write wins.
    pub fn on_move_input(&mut self, direction: MoveDirection, pressed: bool) {
        self.moves.set(direction, pressed);
    }

    /// Drop every held movement key, e.g. after the key bindings changed.
    pub fn release_all_moves(&mut self) {
        self.moves = MoveFlags::default();
    }

    /// Start a jump if `pressed` and the player is standing on something.
    pub fn on_jump_input(&mut self, pressed: bool) {
        if pressed {
            physics::try_jump(&mut self.state, self.tuning.jump_speed);
        }
    }

    /// Accumulate an analog look delta on one axis.
    pub fn on_look_input(&mut self, axis: LookAxis, delta: f32) {
        camera::apply_look(&mut self.state, &self.tuning, axis, delta);
    }

    /// Dispatch a named action from the input layer.
    pub fn on_action(&mut self, action: PlayerAction, pressed: bool) {
        match action {
            PlayerAction::Move(direction) => self.on_move_input(direction, pressed),
            PlayerAction::Jump => self.on_jump_input(pressed),
        }
    }

    /// Advance one tick of `dt` seconds against `world`.
    ///
    /// Horizontal and vertical resolution are independent: a blocked move
    /// keeps the old X/Z but gravity and landing still apply.
    pub fn update(&mut self, world: &impl CollisionWorld, dt: f32) {
        let t = self.tuning;
        let displacement = movement::horizontal_displacement(&self.moves, self.state.yaw, t.move_speed, dt);

        physics::apply_gravity(&mut self.state.velocity, t.gravity, dt);
        let candidate = self.state.position + displacement + self.state.velocity * dt;

        movement::resolve_horizontal(world, &mut self.state.position, candidate, t.width);

        let feet_at = Vec3::new(self.state.position.x, candidate.y, self.state.position.z);
        let rest_y = world.ground_height_at(feet_at) + t.height / 2.0;
        physics::settle_vertical(&mut self.state, candidate.y, rest_y);
    }

    /// Where the camera should be for the current state.
    #[must_use]
    pub fn view(&self) -> CameraView {
        CameraView::follow(&self.state, Vec3::from_array(self.tuning.camera_offset))
    }

    /// Push the current camera placement to `sink`.
    pub fn publish_view(&self, sink: &mut impl ViewSink) {
        let view = self.view();
        sink.set_location(view.location);
        sink.look_at(view.target, Vec3::Y);
    }

    /// Move the player's visual `node` in `scene` to the current position.
    pub fn publish_node<S: SceneGraph>(&self, scene: &mut S, node: S::Node) {
        scene.set_translation(node, self.state.position);
    }
}
