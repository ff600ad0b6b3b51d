//! Scene collaborator: attach, move and detach visual nodes.
//!
//! Game code describes what something looks like as a `Visual` (a few
//! coloured primitives) and hands it to a `SceneGraph`, which owns the actual
//! scene. `BevyScene` is the engine-backed implementation; tests use a
//! recording one.

pub mod bevy_scene;
pub mod visual;

use bevy::math::{Vec2, Vec3};

pub use bevy_scene::BevyScene;
pub use visual::{ground_visual, object_visual, patch_visual, player_visual, test_cube_visual};

use crate::map::Map;

/// A primitive shape, sized in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Box with full side lengths.
    Cuboid { size: Vec3 },
    /// Upright cylinder.
    Cylinder { radius: f32, height: f32 },
    /// Horizontal rectangle facing up.
    Quad { size: Vec2 },
}

/// One coloured primitive of a visual, placed relative to the node.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualPart {
    pub name: &'static str,
    pub shape: Shape,
    pub offset: Vec3,
    /// sRGB + alpha.
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Visual {
    pub parts: Vec<VisualPart>,
}

impl Visual {
    #[must_use]
    pub fn single(name: &'static str, shape: Shape, color: [f32; 4]) -> Self {
        Self {
            parts: vec![VisualPart {
                name,
                shape,
                offset: Vec3::ZERO,
                color,
            }],
        }
    }

    #[must_use]
    pub fn with_part(mut self, part: VisualPart) -> Self {
        self.parts.push(part);
        self
    }
}

/// The scene graph as seen by game code.
pub trait SceneGraph {
    type Node: Copy;

    /// Add `visual` to the scene at `translation` and return its node.
    fn attach(&mut self, name: &str, visual: &Visual, translation: Vec3) -> Self::Node;

    /// Move an attached node.
    fn set_translation(&mut self, node: Self::Node, translation: Vec3);

    /// Remove a node and everything under it.
    fn detach(&mut self, node: Self::Node);
}

/// Nodes attached on behalf of one owner, detached together.
#[derive(Debug, Clone)]
pub struct SceneNodes<N> {
    nodes: Vec<N>,
}

impl<N> Default for SceneNodes<N> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<N: Copy> SceneNodes<N> {
    pub fn attach<S: SceneGraph<Node = N>>(&mut self, scene: &mut S, name: &str, visual: &Visual, translation: Vec3) -> N {
        let node = scene.attach(name, visual, translation);
        self.nodes.push(node);
        node
    }

    /// Attach the ground, its patches and every object of `map`.
    pub fn attach_map<S: SceneGraph<Node = N>>(scene: &mut S, map: &Map) -> Self {
        let mut nodes = Self::default();
        nodes.attach(
            scene,
            "Ground",
            &ground_visual(map.size()),
            Vec3::new(0.0, crate::map::layout::GROUND_Y, 0.0),
        );
        for patch in map.patches() {
            nodes.attach(scene, "Stone Patch", &patch_visual(patch.size), patch.center);
        }
        for object in map.objects() {
            let name = format!("MapObject_{}", object.kind().name());
            nodes.attach(scene, &name, &object_visual(object), object.position());
        }
        nodes
    }

    /// Detach every node. Returns how many were detached; zero when nothing
    /// was attached or everything was already detached.
    pub fn detach_all<S: SceneGraph<Node = N>>(&mut self, scene: &mut S) -> usize {
        let count = self.nodes.len();
        for node in self.nodes.drain(..) {
            scene.detach(node);
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::map::ObjectKind;
    use crate::settings::MapSettings;

    /// Scene that records calls instead of rendering.
    #[derive(Default)]
    pub(crate) struct RecordingScene {
        pub attached: Vec<(usize, String, Visual, Vec3)>,
        pub detached: Vec<usize>,
        pub moved: Vec<(usize, Vec3)>,
    }

    impl SceneGraph for RecordingScene {
        type Node = usize;

        fn attach(&mut self, name: &str, visual: &Visual, translation: Vec3) -> usize {
            let id = self.attached.len();
            self.attached.push((id, name.to_string(), visual.clone(), translation));
            id
        }

        fn set_translation(&mut self, node: usize, translation: Vec3) {
            self.moved.push((node, translation));
        }

        fn detach(&mut self, node: usize) {
            self.detached.push(node);
        }
    }

    #[test]
    fn map_attaches_ground_patches_and_objects() {
        let map = Map::load(&MapSettings::default());
        let mut scene = RecordingScene::default();
        let nodes = SceneNodes::attach_map(&mut scene, &map);

        assert_eq!(nodes.len(), 1 + map.patches().len() + map.objects().len());
        assert_eq!(scene.attached[0].1, "Ground");

        let platform = scene
            .attached
            .iter()
            .find(|(_, name, _, _)| name == "MapObject_Platform")
            .expect("platform attached");
        assert_eq!(platform.3, Vec3::new(0.0, 3.5, 0.0));
        assert_eq!(map.count(ObjectKind::Platform), 1);
    }

    #[test]
    fn detach_all_is_idempotent() {
        let map = Map::load(&MapSettings::default());
        let mut scene = RecordingScene::default();
        let mut nodes = SceneNodes::attach_map(&mut scene, &map);
        let attached = nodes.len();

        assert_eq!(nodes.detach_all(&mut scene), attached);
        assert_eq!(scene.detached.len(), attached);
        assert_eq!(nodes.detach_all(&mut scene), 0);
        assert_eq!(scene.detached.len(), attached);
        assert!(nodes.is_empty());
    }
}
