//! Window present mode, driven by `graphics.vsync`.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use shooter3d::settings::Settings;

#[must_use]
pub fn present_mode_for(vsync: bool) -> PresentMode {
    if vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    }
}

/// Re-apply the present mode when the vsync setting changes at runtime.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut applied: Local<Option<bool>>,
) {
    let vsync = settings.graphics.vsync;
    if *applied == Some(vsync) {
        return;
    }
    for mut window in &mut windows {
        window.present_mode = present_mode_for(vsync);
    }
    *applied = Some(vsync);
}
