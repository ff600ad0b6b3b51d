//! Horizontal player movement.
//!
//! Movement keys are independent flags; each held key adds a full-speed
//! step along its axis, so diagonals are faster than straight lines. A step
//! that would put the player's footprint inside anything is dropped whole.

use crate::map::{CollisionWorld, Map};
use crate::player::{MoveDirection, PlayerController};
use bevy::prelude::*;

/// The four movement keys, as last reported by the input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

impl MoveFlags {
    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        match direction {
            MoveDirection::Forward => self.forward = pressed,
            MoveDirection::Backward => self.backward = pressed,
            MoveDirection::StrafeLeft => self.strafe_left = pressed,
            MoveDirection::StrafeRight => self.strafe_right = pressed,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.strafe_left || self.strafe_right
    }
}

/// Walking direction for `yaw`. Pitch never tilts movement.
#[must_use]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    (Quat::from_rotation_y(yaw) * Vec3::NEG_Z).normalize()
}

/// Strafe direction for a horizontal `forward`.
#[must_use]
pub fn right_from_forward(forward: Vec3) -> Vec3 {
    forward.cross(Vec3::Y).normalize()
}

/// Horizontal step for one tick. Not normalised: forward plus strafe covers
/// `sqrt(2)` times the distance of either alone.
#[must_use]
pub fn horizontal_displacement(moves: &MoveFlags, yaw: f32, speed: f32, dt: f32) -> Vec3 {
    let forward = forward_from_yaw(yaw);
    let right = right_from_forward(forward);
    let step = speed * dt;

    let mut displacement = Vec3::ZERO;
    if moves.forward {
        displacement += forward * step;
    }
    if moves.strafe_left {
        displacement -= right * step;
    }
    if moves.backward {
        displacement -= forward * step;
    }
    if moves.strafe_right {
        displacement += right * step;
    }
    displacement
}

/// Commit the X/Z of `candidate` to `position` if a footprint of `width`
/// fits there. Returns whether the move was taken.
pub fn resolve_horizontal(world: &impl CollisionWorld, position: &mut Vec3, candidate: Vec3, width: f32) -> bool {
    if !world.is_position_valid(candidate, width) {
        return false;
    }
    position.x = candidate.x;
    position.z = candidate.z;
    true
}

/// Advance every player by one frame against the loaded map.
///
/// No-op while no map is loaded (main menu).
///
/// # Arguments
/// * `time` - frame delta used as the tick length
/// * `map` - the session's collision world
/// * `players` - controllers to advance
#[allow(clippy::needless_pass_by_value)]
pub fn player_update(time: Res<Time>, map: Option<Res<Map>>, mut players: Query<&mut PlayerController>) {
    let Some(map) = map else { return };
    let dt = time.delta_seconds();
    for mut player in &mut players {
        player.update(&*map, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::FlatGround;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_yaw_walks_down_negative_z() {
        assert!(forward_from_yaw(0.0).abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(right_from_forward(Vec3::NEG_Z).abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn quarter_turn_left_walks_down_negative_x() {
        assert!(forward_from_yaw(FRAC_PI_2).abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn opposite_keys_cancel() {
        let moves = MoveFlags {
            forward: true,
            backward: true,
            ..MoveFlags::default()
        };
        assert!(horizontal_displacement(&moves, 0.7, 10.0, 0.1).abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn single_key_moves_speed_times_dt() {
        let mut moves = MoveFlags::default();
        moves.set(MoveDirection::StrafeLeft, true);
        let d = horizontal_displacement(&moves, 0.0, 10.0, 0.1);
        assert!(d.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), EPS));
        assert!(moves.any());
    }

    #[test]
    fn diagonal_is_not_normalised() {
        let moves = MoveFlags {
            forward: true,
            strafe_right: true,
            ..MoveFlags::default()
        };
        let d = horizontal_displacement(&moves, 1.2, 10.0, 0.1);
        assert!((d.length() - 2f32.sqrt()).abs() < EPS);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn valid_move_commits_only_x_and_z() {
        let mut position = Vec3::new(0.0, 1.0, 0.0);
        assert!(resolve_horizontal(&FlatGround::default(), &mut position, Vec3::new(2.0, 9.0, 3.0), 1.0));
        assert_eq!(position, Vec3::new(2.0, 1.0, 3.0));
    }
}
