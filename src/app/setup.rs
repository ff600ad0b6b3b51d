//! Startup: lights and the one 3D camera shared by the menu and the game.
use bevy::prelude::*;
use bevy_atmosphere::prelude::AtmosphereCamera;
use shooter3d::session::MENU_CAMERA_POSITION;

#[derive(Component)]
pub struct Sun;

pub fn setup(mut commands: Commands) {
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                shadows_enabled: false,
                ..default()
            },
            transform: Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        Sun,
    ));

    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(MENU_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        AtmosphereCamera::default(),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
