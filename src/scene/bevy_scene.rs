//! `SceneGraph` backed by Bevy entities.
//!
//! Each attached visual becomes a parent `SpatialBundle` with one unlit
//! `PbrBundle` child per part. Moving a node replaces its `Transform`;
//! detaching despawns the whole subtree.

use bevy::prelude::*;

use super::{SceneGraph, Shape, Visual, VisualPart};

pub struct BevyScene<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
}

impl<'a, 'w, 's> BevyScene<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        materials: &'a mut Assets<StandardMaterial>,
    ) -> Self {
        Self {
            commands,
            meshes,
            materials,
        }
    }

    fn mesh_for(&mut self, shape: Shape) -> Handle<Mesh> {
        match shape {
            Shape::Cuboid { size } => self.meshes.add(Cuboid::from_size(size)),
            Shape::Cylinder { radius, height } => self.meshes.add(Cylinder::new(radius, height)),
            Shape::Quad { size } => self.meshes.add(Plane3d::default().mesh().size(size.x, size.y)),
        }
    }

    fn part_bundle(&mut self, part: &VisualPart) -> PbrBundle {
        let [r, g, b, a] = part.color;
        PbrBundle {
            mesh: self.mesh_for(part.shape),
            material: self.materials.add(StandardMaterial {
                base_color: Color::srgba(r, g, b, a),
                unlit: true,
                ..default()
            }),
            transform: Transform::from_translation(part.offset),
            ..default()
        }
    }
}

impl SceneGraph for BevyScene<'_, '_, '_> {
    type Node = Entity;

    fn attach(&mut self, name: &str, visual: &Visual, translation: Vec3) -> Entity {
        // build the asset handles first, the child builder borrows `commands`
        let parts: Vec<(Name, PbrBundle)> = visual
            .parts
            .iter()
            .map(|part| (Name::new(part.name), self.part_bundle(part)))
            .collect();

        self.commands
            .spawn((Name::new(name.to_string()), SpatialBundle::from_transform(Transform::from_translation(translation))))
            .with_children(|parent| {
                for part in parts {
                    parent.spawn(part);
                }
            })
            .id()
    }

    fn set_translation(&mut self, node: Entity, translation: Vec3) {
        if let Some(mut entity) = self.commands.get_entity(node) {
            entity.insert(Transform::from_translation(translation));
        }
    }

    fn detach(&mut self, node: Entity) {
        if let Some(entity) = self.commands.get_entity(node) {
            entity.despawn_recursive();
        }
    }
}
