//! Debug utilities: a key (F3 default) that dumps diagnostics, player state
//! and map contents to a timestamped text file in './debug-dumps/', and a
//! toggle (F2 default) that draws every map object's collision box.
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};
use sysinfo::{Pid, ProcessExt, System, SystemExt};

use crate::map::{Map, ObjectKind};
use crate::player::PlayerController;
use crate::settings::Settings;

pub const DUMP_DIR: &str = "debug-dumps";

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (debug_dump_system, toggle_collision_debug, draw_collision_boxes));
    }
}

fn kb_to_mb(kb: u64) -> String {
    format!("{:.2} MB", (kb as f64) / 1024.0)
}

/// Player and map section of the dump.
#[must_use]
pub fn describe_session(player: Option<&PlayerController>, map: Option<&Map>) -> String {
    let mut out = String::new();
    match player {
        Some(p) => {
            let pos = p.position();
            let vel = p.velocity();
            writeln!(out, "Player position: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z).ok();
            writeln!(out, "Player velocity: ({:.2}, {:.2}, {:.2})", vel.x, vel.y, vel.z).ok();
            writeln!(
                out,
                "Player yaw: {:.1} deg, pitch: {:.1} deg, on ground: {}",
                p.yaw().to_degrees(),
                p.pitch().to_degrees(),
                p.on_ground()
            )
            .ok();
        }
        None => {
            writeln!(out, "Player: none").ok();
        }
    }

    match map {
        Some(m) => {
            writeln!(
                out,
                "Map: size={} loaded={} objects={} collision debug={}",
                m.size(),
                m.is_loaded(),
                m.objects().len(),
                m.debug_mode()
            )
            .ok();
            for kind in ObjectKind::ALL {
                writeln!(out, "  {} -> {}", kind.name(), m.count(kind)).ok();
            }
        }
        None => {
            writeln!(out, "Map: not loaded").ok();
        }
    }
    out
}

/// Write a debug dump when the `dump_debug` key is pressed.
///
/// # Arguments
/// * `diagnostics` - FPS source
/// * `query_entities` - every entity, for the total count
/// * `players` - player state for the session section
/// * `map` - per-kind object counts, if a session is running
#[allow(clippy::needless_pass_by_value)]
fn debug_dump_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    diagnostics: Res<DiagnosticsStore>,
    query_entities: Query<Entity>,
    players: Query<&PlayerController>,
    map: Option<Res<Map>>,
) {
    if !keys.just_pressed(settings.controls.key_for("dump_debug", KeyCode::F3)) {
        return;
    }

    let now = SystemTime::now();
    let ts_secs = now.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
    let dt: DateTime<Utc> = DateTime::from(now);
    let human_ts = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let fname = format!("{DUMP_DIR}/debug-{ts_secs}.txt");

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let mut sys = System::new_all();
    sys.refresh_all();
    let proc = sys.process(Pid::from(std::process::id() as usize));
    let proc_mem_kb = proc.map_or(0, |p| p.memory());

    let mut out = String::new();
    writeln!(out, "Timestamp: {human_ts} (epoch secs: {ts_secs})").ok();
    writeln!(out, "FPS: {fps:.1}, frame_time: {:.4} ms", frame_time * 1000.0).ok();
    writeln!(out, "Entities: {}", query_entities.iter().count()).ok();
    writeln!(out, "Process memory: {}", kb_to_mb(proc_mem_kb)).ok();
    writeln!(
        out,
        "System memory: total={} used={}",
        kb_to_mb(sys.total_memory()),
        kb_to_mb(sys.used_memory())
    )
    .ok();
    writeln!(out).ok();
    out.push_str(&describe_session(players.get_single().ok(), map.as_deref()));

    if let Err(e) = fs::create_dir_all(DUMP_DIR) {
        error!("debug dump: failed to create dir '{}': {}", DUMP_DIR, e);
        return;
    }
    if let Err(e) = fs::write(&fname, out) {
        error!("debug dump: failed to write {}: {}", fname, e);
    } else {
        info!("wrote debug dump: {}", fname);
    }
}

/// Flip the map's collision debug mode on the `toggle_collision` key.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_collision_debug(keys: Res<ButtonInput<KeyCode>>, settings: Res<Settings>, map: Option<ResMut<Map>>) {
    let Some(mut map) = map else { return };
    if keys.just_pressed(settings.controls.key_for("toggle_collision", KeyCode::F2)) {
        let on = !map.debug_mode();
        map.set_debug_mode(on);
        info!("collision debug {}", if on { "on" } else { "off" });
    }
}

/// Outline every collision box while debug mode is on.
#[allow(clippy::needless_pass_by_value)]
pub fn draw_collision_boxes(map: Option<Res<Map>>, mut gizmos: Gizmos) {
    let Some(map) = map else { return };
    if !map.debug_mode() {
        return;
    }
    let red = Color::srgb(1.0, 0.0, 0.0);
    for object in map.objects() {
        gizmos.cuboid(
            Transform::from_translation(object.position()).with_scale(object.size()),
            red,
        );
    }
}
