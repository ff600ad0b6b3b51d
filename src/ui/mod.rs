//! User interface helpers: debug overlay and crosshair.
//!
//! The overlay (F1 default) periodically shows FPS, the player's position,
//! whether they are grounded, where they are looking, and how many objects
//! the map holds.

use crate::map::Map;
use crate::player::PlayerController;
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore};
use bevy::prelude::*;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Component)]
pub struct DebugOverlayText;

#[derive(Component)]
pub struct Crosshair;

/// Insert the overlay refresh timer and visibility state.
///
/// # Arguments
/// * `commands` - `Commands` to insert both resources
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(0.5, TimerMode::Repeating)));
    commands.insert_resource(DebugOverlayState::default());
}

/// Toggle the debug overlay on the `toggle_debug` key.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.controls.key_for("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// Overlay text for one refresh.
#[must_use]
pub fn overlay_text(fps: f64, frame_time: f64, player: Option<&PlayerController>, object_count: usize) -> String {
    let player_lines = player.map_or_else(
        || "Pos: N/A\nGrounded: N/A\nLook: N/A".to_string(),
        |p| {
            let pos = p.position();
            format!(
                "Pos: ({:.1}, {:.1}, {:.1})\nGrounded: {}\nLook: yaw {:.0} deg, pitch {:.0} deg",
                pos.x,
                pos.y,
                pos.z,
                p.on_ground(),
                p.yaw().to_degrees(),
                p.pitch().to_degrees()
            )
        },
    );
    format!(
        "FPS: {:.1}\nFrame Time: {:.2} ms\nObjects: {}\n{}",
        fps,
        frame_time * 1000.0,
        object_count,
        player_lines
    )
}

#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub state: Res<'w, DebugOverlayState>,
    pub map: Option<Res<'w, Map>>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub query: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub players: Query<'w, 's, &'static PlayerController>,
}

/// Refresh the overlay text every timer interval.
pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.query.get_single_mut() else { return };

    if !ctx.state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = ctx
        .diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = ctx
        .diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let object_count = ctx.map.as_ref().map_or(0, |m| m.objects().len());

    text.sections[0].value = overlay_text(fps, frame_time, ctx.players.get_single().ok(), object_count);
}

pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 18.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                    ..default()
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

/// Spawn a crosshair centred on the screen.
pub fn spawn_crosshair(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                ..default()
            },
            Crosshair,
        ))
        .with_children(|p| {
            for (width, height) in [(20.0, 2.0), (2.0, 20.0)] {
                p.spawn(NodeBundle {
                    style: Style {
                        position_type: PositionType::Absolute,
                        width: Val::Px(width),
                        height: Val::Px(height),
                        ..default()
                    },
                    background_color: Color::WHITE.into(),
                    ..default()
                });
            }
        });
}

pub fn despawn_crosshair(mut commands: Commands, crosshairs: Query<Entity, With<Crosshair>>) {
    for entity in &crosshairs {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerTuning;

    #[test]
    fn overlay_without_player() {
        let text = overlay_text(60.0, 0.016, None, 0);
        assert!(text.starts_with("FPS: 60.0\nFrame Time: 16.00 ms\nObjects: 0"));
        assert!(text.contains("Pos: N/A"));
    }

    #[test]
    fn overlay_with_player() {
        let player = PlayerController::new(Vec3::new(1.0, 2.0, 3.0), PlayerTuning::default());
        let text = overlay_text(30.0, 0.033, Some(&player), 42);
        assert!(text.contains("Objects: 42"));
        assert!(text.contains("Pos: (1.0, 2.0, 3.0)"));
        assert!(text.contains("Grounded: false"));
    }
}
