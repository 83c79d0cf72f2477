// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by EntityId.
// Decoupled from Entity/Scene internals: the graph owns local transforms,
// `propagate` writes the resulting world transforms into the Scene.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(pivot, LocalTransform::new());
//   graph.register_with(planet, LocalTransform::new().with_offset(Vec3::X * 74.0));
//   graph.set_parent(planet, Some(pivot));
//   graph.propagate(&mut scene);

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for entities in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct WorldTransform {
    pos: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl WorldTransform {
    const IDENTITY: Self = Self {
        pos: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Compose a child's local transform onto this (parent) world transform.
    fn compose(&self, local: &LocalTransform) -> Self {
        Self {
            pos: self.pos + self.rotation * (self.scale * local.offset),
            rotation: self.rotation * local.rotation,
            scale: self.scale * local.scale,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph. Manages parent-child relationships.
///
/// Exists separately from Scene; games that need hierarchy create this
/// alongside their Scene.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level), in registration order.
    roots: Vec<EntityId>,
    /// Set when hierarchy or a local transform changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with the default local transform.
    pub fn register(&mut self, id: EntityId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register an entity as a root with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Register `child` under `parent` with a local transform in one call.
    pub fn attach(&mut self, child: EntityId, parent: EntityId, local: LocalTransform) {
        self.register_with(child, local);
        self.set_parent(child, Some(parent));
    }

    /// Replace only the local rotation of an entity.
    pub fn set_rotation(&mut self, id: EntityId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.rotation = rotation;
            self.dirty = true;
        }
    }

    /// Propagate transforms from roots down through the hierarchy,
    /// overwriting `Entity::pos/rotation/scale` in the scene.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            self.propagate_recursive(root, WorldTransform::IDENTITY, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(&self, id: EntityId, parent: WorldTransform, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = parent.compose(&node.local);

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world.pos;
            entity.rotation = world.rotation;
            entity.scale = world.scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register(parent);
        graph.register(child);
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.nodes[&child].parent, Some(parent));
        assert_eq!(graph.nodes[&parent].children, vec![child]);
        assert!(!graph.roots.contains(&child));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn propagate_translates_children() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = scene.spawn(Entity::new(EntityId(1)));
        let child = scene.spawn(Entity::new(EntityId(2)));

        graph.register_with(parent, LocalTransform::new().with_offset(Vec3::new(100.0, 0.0, 100.0)));
        graph.attach(child, parent, LocalTransform::new().with_offset(Vec3::new(50.0, 0.0, 0.0)));
        graph.propagate(&mut scene);

        assert!(approx(scene.get(child).unwrap().pos, Vec3::new(150.0, 0.0, 100.0)));
    }

    #[test]
    fn rotating_pivot_swings_child_around_y() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let pivot = scene.spawn(Entity::new(EntityId(1)));
        let body = scene.spawn(Entity::new(EntityId(2)));

        graph.register(pivot);
        graph.attach(body, pivot, LocalTransform::new().with_offset(Vec3::new(10.0, 0.0, 0.0)));
        graph.set_rotation(pivot, Quat::from_rotation_y(FRAC_PI_2));
        graph.propagate(&mut scene);

        // +X rotated a quarter turn about +Y lands on -Z.
        assert!(approx(scene.get(body).unwrap().pos, Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn child_rotation_does_not_move_child() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let pivot = scene.spawn(Entity::new(EntityId(1)));
        let body = scene.spawn(Entity::new(EntityId(2)));

        graph.register(pivot);
        graph.attach(body, pivot, LocalTransform::new().with_offset(Vec3::new(10.0, 0.0, 0.0)));
        graph.set_rotation(body, Quat::from_rotation_y(1.0));
        graph.propagate(&mut scene);

        assert!(approx(scene.get(body).unwrap().pos, Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn propagate_skips_when_clean() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let id = scene.spawn(Entity::new(EntityId(1)));
        graph.register_with(id, LocalTransform::new().with_offset(Vec3::X));
        graph.propagate(&mut scene);
        assert!(!graph.is_dirty());

        scene.get_mut(id).unwrap().pos = Vec3::ZERO;
        graph.propagate(&mut scene);
        assert_eq!(scene.get(id).unwrap().pos, Vec3::ZERO);
    }

    #[test]
    fn reparenting_moves_child() {
        let mut graph = TransformGraph::new();
        let (a, b, child) = (EntityId(1), EntityId(2), EntityId(3));

        graph.register(a);
        graph.register(b);
        graph.attach(child, a, LocalTransform::new());
        graph.set_parent(child, Some(b));

        assert!(graph.nodes[&a].children.is_empty());
        assert_eq!(graph.nodes[&b].children, vec![child]);

        graph.set_parent(child, None);
        assert!(graph.roots.contains(&child));
        assert!(graph.nodes[&b].children.is_empty());
    }
}
