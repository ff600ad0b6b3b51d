use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{Window, WindowPlugin};
use bevy_atmosphere::prelude::*;
use shooter3d::debug::DebugDumpPlugin;
use shooter3d::player::{camera_look, cursor_grab, follow_player, player_input, player_update};
use shooter3d::session::{end_session, enter_menu, exit_menu, start_session, sync_session_settings};
use shooter3d::settings::loader as settings_loader;
use shooter3d::state::{menu_input, session_input, GameState};
use shooter3d::ui::{
    despawn_crosshair, setup_debug_overlay, spawn_crosshair, spawn_debug_overlay, toggle_debug_overlay,
    update_debug_overlay,
};

mod app;
use app::display::present_mode_for;
use app::setup;

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Shooter 3D".into(),
            position: WindowPosition::Centered(MonitorSelection::Primary),
            present_mode: present_mode_for(settings.graphics.vsync),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(FrameTimeDiagnosticsPlugin)
    .add_plugins(LogDiagnosticsPlugin::default())
    .add_plugins(DebugDumpPlugin);

    if settings.atmosphere.enabled {
        app.add_plugins(AtmospherePlugin)
            .insert_resource(AtmosphereModel::default())
            .insert_resource(AtmosphereSettings {
                resolution: settings.atmosphere.resolution,
                dithering: settings.atmosphere.dithering,
                ..Default::default()
            });
    } else {
        app.insert_resource(ClearColor(Color::srgb(0.5, 0.7, 0.9)));
    }

    app.insert_resource(settings.clone());
    app.insert_resource(settings_watcher);
    app.init_state::<GameState>();

    app.add_systems(Startup, (setup, setup_debug_overlay, spawn_debug_overlay));

    app.add_systems(OnEnter(GameState::MainMenu), enter_menu);
    app.add_systems(OnExit(GameState::MainMenu), exit_menu);
    app.add_systems(OnEnter(GameState::Playing), (start_session, spawn_crosshair));
    app.add_systems(OnExit(GameState::Playing), (end_session, despawn_crosshair));

    app.add_systems(Update, menu_input.run_if(in_state(GameState::MainMenu)));
    app.add_systems(
        Update,
        (player_input, camera_look, player_update, follow_player)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    app.add_systems(Update, (cursor_grab, session_input).run_if(in_state(GameState::Playing)));

    app.add_systems(Update, (toggle_debug_overlay, update_debug_overlay));
    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_session_settings);
    app.add_systems(Update, crate::app::sync_vsync_settings);
    if settings.atmosphere.enabled {
        app.add_systems(Update, crate::app::sync_atmosphere_settings);
    }

    app.run();
}
