/// Pointer picking: which body, if any, lies under a click.
///
/// Only meshes registered in the `PickTable` are candidates. The sun, rings,
/// orbit lines and stars are never registered, so they can't be picked.

use std::collections::HashMap;
use orrery_engine::{EntityId, Ray, RayHit, Scene};
use orrery_engine::systems::raycast::intersect_entities;

/// A resolved pick: body index plus the hit that found it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub body: usize,
    pub hit: RayHit,
}

/// Side table from pickable mesh to body index.
#[derive(Debug, Clone, Default)]
pub struct PickTable {
    meshes: Vec<EntityId>,
    bodies: HashMap<EntityId, usize>,
}

impl PickTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `mesh` as the pickable surface of body `body`.
    pub fn insert(&mut self, mesh: EntityId, body: usize) {
        if self.bodies.insert(mesh, body).is_none() {
            self.meshes.push(mesh);
        }
    }

    pub fn body_for(&self, mesh: EntityId) -> Option<usize> {
        self.bodies.get(&mesh).copied()
    }

    pub fn meshes(&self) -> &[EntityId] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Nearest registered mesh hit by `ray`.
    pub fn pick(&self, ray: &Ray, scene: &Scene) -> Option<Pick> {
        intersect_entities(ray, scene, self.meshes.iter().copied())
            .into_iter()
            .find_map(|hit| self.body_for(hit.id).map(|body| Pick { body, hit }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::{Color, Entity, Material, MeshComponent};

    fn ball(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, 16, Material::standard(Color::WHITE)))
    }

    fn scene() -> (Scene, PickTable) {
        let mut scene = Scene::new();
        // sun, not registered
        scene.spawn(ball(1, Vec3::ZERO, 18.0));
        scene.spawn(ball(2, Vec3::new(0.0, 0.0, 40.0), 5.0));
        scene.spawn(ball(3, Vec3::new(0.0, 0.0, -40.0), 5.0));
        let mut picks = PickTable::new();
        picks.insert(EntityId(2), 0);
        picks.insert(EntityId(3), 1);
        (scene, picks)
    }

    #[test]
    fn nearest_body_wins() {
        let (scene, picks) = scene();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::NEG_Z);
        let pick = picks.pick(&ray, &scene).unwrap();
        assert_eq!(pick.body, 0);
        assert!((pick.hit.distance - 55.0).abs() < 1e-3);
    }

    #[test]
    fn unregistered_mesh_is_transparent() {
        let (scene, picks) = scene();
        // Straight down onto the sun; no body beneath it.
        let ray = Ray::new(Vec3::new(0.0, 100.0, 0.0), Vec3::NEG_Y);
        assert!(picks.pick(&ray, &scene).is_none());
    }

    #[test]
    fn miss_returns_none() {
        let (scene, picks) = scene();
        let ray = Ray::new(Vec3::new(100.0, 0.0, 0.0), Vec3::Y);
        assert!(picks.pick(&ray, &scene).is_none());
    }

    #[test]
    fn duplicate_insert_keeps_one_entry() {
        let mut picks = PickTable::new();
        picks.insert(EntityId(5), 0);
        picks.insert(EntityId(5), 2);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks.body_for(EntityId(5)), Some(2));
    }
}
