//! Game state machine: main menu and play session.

use bevy::prelude::*;

use crate::settings::Settings;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
}

/// True when the player asked to leave the menu this frame.
#[must_use]
pub fn start_requested(keys: &ButtonInput<KeyCode>, mouse: &ButtonInput<MouseButton>, start_key: KeyCode) -> bool {
    keys.just_pressed(start_key) || mouse.just_pressed(MouseButton::Left)
}

/// Start playing on the `start` key or a left click.
#[allow(clippy::needless_pass_by_value)]
pub fn menu_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<Settings>,
    mut next: ResMut<NextState<GameState>>,
) {
    let start = settings.controls.key_for("start", KeyCode::Enter);
    if start_requested(&keys, &mouse, start) {
        info!("starting game");
        next.set(GameState::Playing);
    }
}

/// Go back to the menu when the `menu` key is released.
#[allow(clippy::needless_pass_by_value)]
pub fn session_input(keys: Res<ButtonInput<KeyCode>>, settings: Res<Settings>, mut next: ResMut<NextState<GameState>>) {
    if keys.just_released(settings.controls.key_for("menu", KeyCode::Backspace)) {
        info!("returning to main menu");
        next.set(GameState::MainMenu);
    }
}
