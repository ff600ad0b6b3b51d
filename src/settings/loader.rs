//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If multiple
//! RON files are present, the first successfully parsed `Settings` will be used.
//! If no RON files are found or if no parsing succeeds, default settings will be used.
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};

pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher(pub crate::ron::RonWatcher);

/// Load settings from `path` (directory). If multiple `.ron` files are present
/// the first parsed `Settings` will be used. If none exist the `Default` is used.
///
/// # Example
/// ```
/// let settings = shooter3d::settings::loader::load_settings_from_dir("data/settings");
/// assert!(settings.map.size > 0.0);
/// ```
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let items: Vec<Settings> = load_ron_files(path);
    items.into_iter().next().unwrap_or_else(|| {
        info!("no settings found in '{path}', using defaults");
        Settings::defaults()
    })
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns the underlying `notify::Error` when the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Check for changes and reload the settings resource when files change.
///
/// Systems that derive state from `Settings` react through change detection
/// (`Res::is_changed`), so this only swaps the resource.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    let mut flag = match watcher.0.changed.lock() {
        Ok(flag) => flag,
        Err(poisoned) => {
            warn!("settings watcher mutex poisoned, recovering");
            poisoned.into_inner()
        }
    };
    if *flag {
        info!("settings changed, reloading");
        *settings = load_settings_from_dir(SETTINGS_DIR);
        *flag = false;
    }
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(crate::ron::RonWatcher::stub())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_gives_defaults() {
        let settings = load_settings_from_dir("definitely/not/a/settings/dir");
        assert_eq!(settings.map.tree_count, 20);
        assert_eq!(settings.player.move_speed, 10.0);
    }

    #[test]
    fn stub_watcher_reports_no_change() {
        let watcher = SettingsWatcher::stub();
        assert!(!*watcher.0.changed.lock().expect("fresh mutex"));
    }
}
