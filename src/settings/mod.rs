//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`). Every field has
//! a serde default so a partial file only overrides what it names.
use crate::player::PlayerTuning;
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self { vsync: Self::default_vsync() }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool, // Invert mouse Y axis
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        [
            ("forward", "W"),
            ("back", "S"),
            ("left", "A"),
            ("right", "D"),
            ("jump", "Space"),
            ("start", "Enter"),
            ("menu", "Backspace"),
            ("release_cursor", "Escape"),
            ("toggle_debug", "F1"),
            ("toggle_collision", "F2"),
            ("dump_debug", "F3"),
        ]
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.to_string()))
        .collect()
    }

    /// Resolve the key bound to `action`, falling back to `default` when the
    /// action is unbound or names a key we do not know.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Arena generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default = "MapSettings::default_size")]
    pub size: f32, // Side length of the square arena, centred on the origin.
    #[serde(default = "MapSettings::default_spawn")]
    pub spawn: [f32; 3], // Player spawn point (on the central platform by default).
    #[serde(default = "MapSettings::default_patch_seed")]
    pub patch_seed: u64, // Seed for the decorative stone patches on the ground.
    #[serde(default = "MapSettings::default_tree_seed")]
    pub tree_seed: u64, // Seed for tree placement and sizes.
    #[serde(default = "MapSettings::default_tree_count")]
    pub tree_count: u32,
    #[serde(default = "MapSettings::default_decoration_seed")]
    pub decoration_seed: u64, // Seed for fence placement.
    #[serde(default)]
    pub decorations: bool, // Place decorative fences.
    #[serde(default)]
    pub debug_collision: bool, // Start with collision boxes drawn.
}

impl MapSettings {
    fn default_size() -> f32 { 60.0 }
    fn default_spawn() -> [f32; 3] { [0.0, 7.0, 0.0] }
    fn default_patch_seed() -> u64 { 42 }
    fn default_tree_seed() -> u64 { 123 }
    fn default_tree_count() -> u32 { 20 }
    fn default_decoration_seed() -> u64 { 456 }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            spawn: Self::default_spawn(),
            patch_seed: Self::default_patch_seed(),
            tree_seed: Self::default_tree_seed(),
            tree_count: Self::default_tree_count(),
            decoration_seed: Self::default_decoration_seed(),
            decorations: false,
            debug_collision: false,
        }
    }
}

/// Atmosphere settings to configure the bevy_atmosphere crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    #[serde(default = "AtmosphereSettings::default_enabled")]
    pub enabled: bool, // Enable the sky renderer (requires a restart)
    #[serde(default = "AtmosphereSettings::default_resolution")]
    pub resolution: u32, // Resolution of each skybox face (updated at runtime)
    #[serde(default = "AtmosphereSettings::default_dithering")]
    pub dithering: bool, // Dithering to reduce colour banding in the sky (updated at runtime)
}

impl AtmosphereSettings {
    fn default_enabled() -> bool { true }
    fn default_resolution() -> u32 { 512 }
    fn default_dithering() -> bool { true }
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            resolution: Self::default_resolution(),
            dithering: Self::default_dithering(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub player: PlayerTuning,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub atmosphere: AtmosphereSettings,
}

const LETTER_KEYS: [KeyCode; 26] = [
    KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
    KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
    KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
    KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
    KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
    KeyCode::KeyZ,
];

const DIGIT_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
    KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
];

const FUNCTION_KEYS: [KeyCode; 12] = [
    KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
    KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
];

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Convert a key identifier from `controls.keybinds` (e.g. "W", "Space",
    /// "F1", "LShift") into a `KeyCode`. Matching is case-insensitive.
    ///
    /// # Returns
    /// `None` if the name does not match any supported key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.trim().to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return Some(LETTER_KEYS[usize::from(c as u8 - b'A')]);
            }
            if c.is_ascii_digit() {
                return Some(DIGIT_KEYS[usize::from(c as u8 - b'0')]);
            }
        }

        if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<usize>().ok()) {
            return (1..=FUNCTION_KEYS.len()).contains(&n).then(|| FUNCTION_KEYS[n - 1]);
        }

        Some(match s.as_str() {
            "SPACE" => KeyCode::Space,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "TAB" => KeyCode::Tab,
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,
            _ => return None,
        })
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse() {
        assert_eq!(Settings::keycode_from_str("w"), Some(KeyCode::KeyW));
        assert_eq!(Settings::keycode_from_str("7"), Some(KeyCode::Digit7));
        assert_eq!(Settings::keycode_from_str("f3"), Some(KeyCode::F3));
        assert_eq!(Settings::keycode_from_str("Return"), Some(KeyCode::Enter));
        assert_eq!(Settings::keycode_from_str("F13"), None);
        assert_eq!(Settings::keycode_from_str("F"), Some(KeyCode::KeyF));
        assert_eq!(Settings::keycode_from_str("nonsense"), None);
    }

    #[test]
    fn unknown_binding_falls_back() {
        let mut controls = ControlsSettings::default();
        controls.keybinds.insert("jump".into(), "???".into());
        assert_eq!(controls.key_for("jump", KeyCode::Space), KeyCode::Space);
        assert_eq!(controls.key_for("forward", KeyCode::ArrowUp), KeyCode::KeyW);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let settings: Settings = ron::from_str("(player: (move_speed: 4.0), map: (tree_count: 3))")
            .expect("valid settings");
        assert_eq!(settings.player.move_speed, 4.0);
        assert_eq!(settings.player.jump_speed, PlayerTuning::default().jump_speed);
        assert_eq!(settings.map.tree_count, 3);
        assert_eq!(settings.map.size, 60.0);
        assert!(settings.graphics.vsync);
        assert_eq!(settings.controls.key_for("jump", KeyCode::KeyJ), KeyCode::Space);
    }
}
