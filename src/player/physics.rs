//! Player vertical physics: gravity, jumping and landing.
//!
//! Only the vertical velocity is integrated. The player is either grounded
//! (resting exactly at ground height with zero vertical speed) or airborne;
//! there are no intermediate landing states.

use crate::player::PlayerState;
use bevy::math::Vec3;

pub fn apply_gravity(velocity: &mut Vec3, gravity: f32, dt: f32) {
    velocity.y += gravity * dt;
}

/// Launch the player if grounded. Returns whether the jump happened.
pub fn try_jump(state: &mut PlayerState, jump_speed: f32) -> bool {
    if !state.on_ground {
        return false;
    }
    state.velocity.y = jump_speed;
    state.on_ground = false;
    true
}

/// Resolve the vertical part of a tick.
///
/// `rest_y` is the height the player's centre has when standing on the
/// ground below it. Reaching or passing it snaps the player there and
/// grounds them; anything above leaves them airborne.
pub fn settle_vertical(state: &mut PlayerState, candidate_y: f32, rest_y: f32) {
    if candidate_y <= rest_y {
        state.position.y = rest_y;
        state.velocity.y = 0.0;
        state.on_ground = true;
    } else {
        state.position.y = candidate_y;
        state.on_ground = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_accumulates() {
        let mut v = Vec3::new(0.0, 15.0, 0.0);
        apply_gravity(&mut v, -30.0, 0.05);
        assert!((v.y - 13.5).abs() < 1e-5);
    }

    #[test]
    fn jump_needs_ground() {
        let mut state = PlayerState::default();
        assert!(!try_jump(&mut state, 15.0));
        assert_eq!(state.velocity.y, 0.0);

        state.on_ground = true;
        assert!(try_jump(&mut state, 15.0));
        assert_eq!(state.velocity.y, 15.0);
        assert!(!state.on_ground);
    }

    #[test]
    fn landing_snaps_and_stops() {
        let mut state = PlayerState {
            velocity: Vec3::new(0.0, -12.0, 0.0),
            ..PlayerState::default()
        };
        settle_vertical(&mut state, 0.7, 1.0);
        assert_eq!(state.position.y, 1.0);
        assert_eq!(state.velocity.y, 0.0);
        assert!(state.on_ground);
    }

    #[test]
    fn exactly_at_rest_height_counts_as_ground() {
        let mut state = PlayerState::default();
        settle_vertical(&mut state, 5.0, 5.0);
        assert!(state.on_ground);
    }

    #[test]
    fn above_ground_is_airborne() {
        let mut state = PlayerState {
            on_ground: true,
            velocity: Vec3::new(0.0, -0.5, 0.0),
            ..PlayerState::default()
        };
        settle_vertical(&mut state, 3.0, 1.0);
        assert_eq!(state.position.y, 3.0);
        assert_eq!(state.velocity.y, -0.5);
        assert!(!state.on_ground);
    }
}
