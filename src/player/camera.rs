//! Camera control and cursor helpers.
//!
//! Mouse motion becomes analog look input on the controller (`camera_look`),
//! the controller's view is pushed to the 3D camera every frame
//! (`follow_player`), and `cursor_grab` locks the cursor while playing.
//!
//! The camera trails the player: a fixed local offset rotated by yaw then
//! pitch, looking one unit ahead of the player along the same rotation.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::player::{LookAxis, PlayerController, PlayerState, PlayerTuning};
use crate::scene::BevyScene;
use crate::settings::Settings;

/// Mouse motion in pixels is divided by this before it counts as analog input.
pub const MOUSE_PIXELS_PER_UNIT: f32 = 1024.0;

/// Apply one analog look delta: yaw is unbounded, pitch is clamped.
pub fn apply_look(state: &mut PlayerState, tuning: &PlayerTuning, axis: LookAxis, delta: f32) {
    let amount = delta * tuning.mouse_sensitivity;
    match axis {
        LookAxis::Yaw => state.yaw += amount,
        LookAxis::Pitch => {
            let max = tuning.max_pitch();
            state.pitch = (state.pitch + amount).clamp(-max, max);
        }
    }
}

/// Orientation of the view: yaw around world up, then pitch around the
/// rotated right axis.
#[must_use]
pub fn view_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

/// Camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub location: Vec3,
    pub target: Vec3,
}

impl CameraView {
    /// Trail the player at `offset` (local space) and look along the view
    /// direction from the player's position.
    #[must_use]
    pub fn follow(state: &PlayerState, offset: Vec3) -> Self {
        let rotation = view_rotation(state.yaw, state.pitch);
        Self {
            location: state.position + rotation * offset,
            target: state.position + rotation * Vec3::NEG_Z,
        }
    }
}

/// Anything that can be placed like a camera.
pub trait ViewSink {
    fn set_location(&mut self, location: Vec3);
    fn look_at(&mut self, target: Vec3, up: Vec3);
}

impl ViewSink for Transform {
    fn set_location(&mut self, location: Vec3) {
        self.translation = location;
    }

    fn look_at(&mut self, target: Vec3, up: Vec3) {
        Transform::look_at(self, target, up);
    }
}

/// Feed this frame's mouse motion to the player while the cursor is grabbed.
///
/// # Arguments
/// * `motion_events` - raw mouse deltas, summed per frame
/// * `settings` - axis inversion flags
#[allow(clippy::needless_pass_by_value)]
pub fn camera_look(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut motion_events: EventReader<MouseMotion>,
    settings: Res<Settings>,
    mut players: Query<&mut PlayerController>,
) {
    let delta: Vec2 = motion_events.read().map(|ev| ev.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    if window.cursor.visible {
        return;
    }

    // screen right turns right (negative yaw), screen down looks down
    let mut yaw = -delta.x / MOUSE_PIXELS_PER_UNIT;
    let mut pitch = -delta.y / MOUSE_PIXELS_PER_UNIT;
    if settings.controls.invert_x {
        yaw = -yaw;
    }
    if settings.controls.invert_y {
        pitch = -pitch;
    }

    for mut player in &mut players {
        player.on_look_input(LookAxis::Yaw, yaw);
        player.on_look_input(LookAxis::Pitch, pitch);
    }
}

/// Place the 3D camera from the player's view and move the player's own
/// node to its position through the scene collaborator.
///
/// # Arguments
/// * `commands` - `Commands` behind the `BevyScene` that moves the node
/// * `players` - the player entity doubles as its visual node
/// * `cameras` - every 3D camera receives the same view
pub fn follow_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    players: Query<(Entity, &PlayerController), Without<Camera3d>>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok((node, player)) = players.get_single() else { return };
    let mut scene = BevyScene::new(&mut commands, &mut meshes, &mut materials);
    player.publish_node(&mut scene, node);
    for mut camera in &mut cameras {
        player.publish_view(&mut *camera);
    }
}

/// Lock and hide the cursor.
pub fn grab_cursor(window: &mut Window) {
    window.cursor.grab_mode = CursorGrabMode::Locked;
    window.cursor.visible = false;
}

/// Free and show the cursor.
pub fn release_cursor(window: &mut Window) {
    window.cursor.grab_mode = CursorGrabMode::None;
    window.cursor.visible = true;
}

/// Grab the cursor on left click, release it on the `release_cursor` key.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut window) = windows.get_single_mut() else { return };
    if mouse.just_pressed(MouseButton::Left) {
        grab_cursor(&mut window);
    }
    if keys.just_pressed(settings.controls.key_for("release_cursor", KeyCode::Escape)) {
        release_cursor(&mut window);
    }
}
