//! Named player actions and their key bindings.
//!
//! The input layer speaks in actions ("forward", "jump", ...) rather than
//! keys. `InputBindings` is registered when a game session starts and removed
//! when it ends; while it is absent `player_input` ignores the keyboard.

use bevy::prelude::*;

use crate::player::PlayerController;
use crate::settings::ControlsSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookAxis {
    Yaw,
    Pitch,
}

/// A discrete action the player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Move(MoveDirection),
    Jump,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 5] = [
        PlayerAction::Move(MoveDirection::Forward),
        PlayerAction::Move(MoveDirection::Backward),
        PlayerAction::Move(MoveDirection::StrafeLeft),
        PlayerAction::Move(MoveDirection::StrafeRight),
        PlayerAction::Jump,
    ];

    /// Name of the action in `controls.keybinds`.
    #[must_use]
    pub fn binding_name(self) -> &'static str {
        match self {
            PlayerAction::Move(MoveDirection::Forward) => "forward",
            PlayerAction::Move(MoveDirection::Backward) => "back",
            PlayerAction::Move(MoveDirection::StrafeLeft) => "left",
            PlayerAction::Move(MoveDirection::StrafeRight) => "right",
            PlayerAction::Jump => "jump",
        }
    }

    #[must_use]
    pub fn default_key(self) -> KeyCode {
        match self {
            PlayerAction::Move(MoveDirection::Forward) => KeyCode::KeyW,
            PlayerAction::Move(MoveDirection::Backward) => KeyCode::KeyS,
            PlayerAction::Move(MoveDirection::StrafeLeft) => KeyCode::KeyA,
            PlayerAction::Move(MoveDirection::StrafeRight) => KeyCode::KeyD,
            PlayerAction::Jump => KeyCode::Space,
        }
    }
}

/// Resolved key for every player action.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputBindings {
    keys: Vec<(PlayerAction, KeyCode)>,
}

impl InputBindings {
    #[must_use]
    pub fn from_controls(controls: &ControlsSettings) -> Self {
        let keys = PlayerAction::ALL
            .into_iter()
            .map(|action| (action, controls.key_for(action.binding_name(), action.default_key())))
            .collect();
        Self { keys }
    }

    #[must_use]
    pub fn key(&self, action: PlayerAction) -> Option<KeyCode> {
        self.keys.iter().find(|(a, _)| *a == action).map(|(_, k)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerAction, KeyCode)> + '_ {
        self.keys.iter().copied()
    }
}

/// Turn key edges into action events on every player.
///
/// # Arguments
/// * `keys` - keyboard state; only this frame's presses and releases count
/// * `bindings` - absent outside a session, which makes this a no-op
/// * `players` - controllers receiving the actions
#[allow(clippy::needless_pass_by_value)]
pub fn player_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Option<Res<InputBindings>>,
    mut players: Query<&mut PlayerController>,
) {
    let Some(bindings) = bindings else { return };
    for mut player in &mut players {
        for (action, key) in bindings.iter() {
            if keys.just_pressed(key) {
                player.on_action(action, true);
            }
            if keys.just_released(key) {
                player.on_action(action, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_are_wasd_and_space() {
        let bindings = InputBindings::from_controls(&ControlsSettings::default());
        assert_eq!(bindings.key(PlayerAction::Move(MoveDirection::Forward)), Some(KeyCode::KeyW));
        assert_eq!(bindings.key(PlayerAction::Move(MoveDirection::StrafeLeft)), Some(KeyCode::KeyA));
        assert_eq!(bindings.key(PlayerAction::Jump), Some(KeyCode::Space));
        assert_eq!(bindings.iter().count(), PlayerAction::ALL.len());
    }

    #[test]
    fn rebinding_from_settings() {
        let mut controls = ControlsSettings::default();
        controls.keybinds.insert("forward".into(), "Z".into());
        controls.keybinds.insert("left".into(), "Q".into());
        controls.keybinds.remove("jump");
        let bindings = InputBindings::from_controls(&controls);
        assert_eq!(bindings.key(PlayerAction::Move(MoveDirection::Forward)), Some(KeyCode::KeyZ));
        assert_eq!(bindings.key(PlayerAction::Move(MoveDirection::StrafeLeft)), Some(KeyCode::KeyQ));
        assert_eq!(bindings.key(PlayerAction::Jump), Some(KeyCode::Space));
    }
}
