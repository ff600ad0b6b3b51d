//! Setting up and tearing down the main menu and a play session.
//!
//! Entering `Playing` loads the map, attaches its visuals, spawns the player
//! and registers the input bindings. Leaving it undoes all of that, so a new
//! session always starts from a freshly generated map.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::map::Map;
use crate::player::{grab_cursor, release_cursor, InputBindings, PlayerController};
use crate::scene::{player_visual, test_cube_visual, BevyScene, SceneNodes};
use crate::settings::Settings;

/// Where the menu camera sits, looking at the origin.
pub const MENU_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Scene nodes owned by the main menu.
#[derive(Resource, Default)]
pub struct MenuNodes(pub SceneNodes<Entity>);

/// Scene nodes owned by the running session (map and player).
#[derive(Resource, Default)]
pub struct SessionNodes(pub SceneNodes<Entity>);

#[allow(clippy::needless_pass_by_value)]
pub fn enter_menu(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let mut nodes = SceneNodes::default();
    let mut scene = BevyScene::new(&mut commands, &mut meshes, &mut materials);
    nodes.attach(&mut scene, "Box", &test_cube_visual(), Vec3::ZERO);
    commands.insert_resource(MenuNodes(nodes));

    for mut camera in &mut cameras {
        *camera = Transform::from_translation(MENU_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y);
    }

    let start = settings.controls.key_for("start", KeyCode::Enter);
    info!("main menu: press {start:?} or click to play");
}

pub fn exit_menu(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    menu: Option<ResMut<MenuNodes>>,
) {
    let Some(mut menu) = menu else { return };
    let mut scene = BevyScene::new(&mut commands, &mut meshes, &mut materials);
    menu.0.detach_all(&mut scene);
    commands.remove_resource::<MenuNodes>();
}

/// Load the map, attach its visuals and spawn the player on it.
///
/// # Arguments
/// * `commands` - `Commands` for the map, bindings and node resources
/// * `meshes` - mesh assets for the `BevyScene`
/// * `materials` - material assets for the `BevyScene`
/// * `settings` - map layout and player tuning
/// * `windows` - primary window, whose cursor is grabbed
#[allow(clippy::needless_pass_by_value)]
pub fn start_session(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let map = Map::load(&settings.map);
    let tuning = settings.player;
    let player = PlayerController::spawn_on(&map, tuning);

    let mut scene = BevyScene::new(&mut commands, &mut meshes, &mut materials);
    let mut nodes = SceneNodes::attach_map(&mut scene, &map);
    let player_node = nodes.attach(
        &mut scene,
        "Player",
        &player_visual(tuning.width, tuning.height),
        player.position(),
    );
    commands.entity(player_node).insert(player);

    info!("session started: {} map nodes attached", nodes.len());
    commands.insert_resource(map);
    commands.insert_resource(SessionNodes(nodes));
    commands.insert_resource(InputBindings::from_controls(&settings.controls));

    if let Ok(mut window) = windows.get_single_mut() {
        grab_cursor(&mut window);
    }
}

/// Detach everything the session attached and unload the map.
pub fn end_session(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Option<ResMut<SessionNodes>>,
    map: Option<ResMut<Map>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if let Some(mut session) = session {
        let mut scene = BevyScene::new(&mut commands, &mut meshes, &mut materials);
        let detached = session.0.detach_all(&mut scene);
        info!("session ended: {detached} nodes detached");
    }
    if let Some(mut map) = map {
        map.unload();
    }
    commands.remove_resource::<SessionNodes>();
    commands.remove_resource::<Map>();
    commands.remove_resource::<InputBindings>();

    if let Ok(mut window) = windows.get_single_mut() {
        release_cursor(&mut window);
    }
}

/// Push reloaded settings into the running session.
///
/// Rebuilt key bindings also release every held movement key.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_session_settings(
    settings: Res<Settings>,
    bindings: Option<ResMut<InputBindings>>,
    mut players: Query<&mut PlayerController>,
) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    let mut rebound = false;
    if let Some(mut bindings) = bindings {
        let rebuilt = InputBindings::from_controls(&settings.controls);
        rebound = *bindings != rebuilt;
        *bindings = rebuilt;
    }
    for mut player in &mut players {
        player.set_tuning(settings.player);
        // the release of a key that is no longer bound would never arrive
        if rebound {
            player.release_all_moves();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{MoveDirection, PlayerAction, PlayerTuning};
    use bevy::ecs::system::RunSystemOnce;

    fn session_world() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.insert_resource(Settings::default());
        world
    }

    #[test]
    fn start_session_loads_map_and_spawns_player() {
        let mut world = session_world();
        world.run_system_once(start_session);

        let map = world.resource::<Map>();
        assert!(map.is_loaded());
        let object_count = map.objects().len();
        let patch_count = map.patches().len();

        assert!(world.contains_resource::<InputBindings>());
        // ground + patches + objects + player
        assert_eq!(world.resource::<SessionNodes>().0.len(), 1 + patch_count + object_count + 1);

        let mut players = world.query::<&PlayerController>();
        let player = players.single(&world);
        assert_eq!(player.position(), Vec3::new(0.0, 7.0, 0.0));
    }

    #[test]
    fn end_session_tears_everything_down() {
        let mut world = session_world();
        world.run_system_once(start_session);
        world.run_system_once(end_session);

        assert!(!world.contains_resource::<Map>());
        assert!(!world.contains_resource::<SessionNodes>());
        assert!(!world.contains_resource::<InputBindings>());
        assert_eq!(world.entities().len(), 0);

        // a second teardown finds nothing to do
        world.run_system_once(end_session);
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn menu_scene_comes_and_goes() {
        let mut world = session_world();
        world.run_system_once(enter_menu);
        assert_eq!(world.resource::<MenuNodes>().0.len(), 1);
        assert!(world.entities().len() >= 2);

        world.run_system_once(exit_menu);
        assert!(!world.contains_resource::<MenuNodes>());
        assert_eq!(world.entities().len(), 0);
    }

    fn reload_app(held: MoveDirection) -> App {
        let settings = Settings::default();
        let mut player = PlayerController::new(Vec3::ZERO, PlayerTuning::default());
        player.on_move_input(held, true);

        let mut app = App::new();
        app.insert_resource(InputBindings::from_controls(&settings.controls))
            .insert_resource(settings)
            .add_systems(Update, sync_session_settings);
        app.world_mut().spawn(player);
        app.update();
        app
    }

    fn held_moves(app: &mut App) -> bool {
        let world = app.world_mut();
        world.query::<&PlayerController>().single(world).moves().any()
    }

    #[test]
    fn rebinding_keys_releases_held_moves() {
        let mut app = reload_app(MoveDirection::Forward);
        app.world_mut()
            .resource_mut::<Settings>()
            .controls
            .keybinds
            .insert("forward".to_string(), "Z".to_string());
        app.update();

        assert!(!held_moves(&mut app));
        let forward = app.world().resource::<InputBindings>().key(PlayerAction::Move(MoveDirection::Forward));
        assert_eq!(forward, Some(KeyCode::KeyZ));
    }

    #[test]
    fn tuning_reload_keeps_held_moves() {
        let mut app = reload_app(MoveDirection::Forward);
        app.world_mut().resource_mut::<Settings>().player.move_speed = 20.0;
        app.update();

        assert!(held_moves(&mut app));
        let world = app.world_mut();
        let speed = world.query::<&PlayerController>().single(world).tuning().move_speed;
        assert_eq!(speed, 20.0);
    }
}
