//! Sky settings sync for `bevy_atmosphere`.
use bevy::prelude::*;
use bevy_atmosphere::prelude::AtmosphereSettings as SkySettings;
use shooter3d::settings::Settings;

/// Copy sky resolution and dithering from `Settings` into the sky renderer
/// whenever they differ from what was last applied. Turning the sky on or off
/// only takes effect on restart.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_atmosphere_settings(
    settings: Res<Settings>,
    mut applied: Local<Option<(u32, bool)>>,
    mut sky: ResMut<SkySettings>,
) {
    let wanted = (settings.atmosphere.resolution, settings.atmosphere.dithering);
    if *applied == Some(wanted) {
        return;
    }
    sky.resolution = wanted.0;
    sky.dithering = wanted.1;
    *applied = Some(wanted);
}
