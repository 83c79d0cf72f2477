//! Ray casting against entity meshes.
//!
//! Intersection is analytic: spheres are tested as true spheres and rings as
//! flat annuli, both in world space after the entity's world transform.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::Shape;
use crate::core::scene::Scene;

/// A half-line in world space. `dir` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `dir`.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir: dir.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// A ray/mesh intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Nearest non-negative ray parameter where the ray meets a sphere.
/// A ray starting inside the sphere reports the exit point. A non-finite
/// center or radius never hits.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if !disc.is_finite() || disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let far = -b + root;
    if far < 0.0 {
        return None;
    }
    let near = -b - root;
    Some(if near >= 0.0 { near } else { far })
}

/// Intersect a ray with an annulus lying in the entity's local XY plane.
fn intersect_ring(ray: &Ray, entity: &Entity, inner: f32, outer: f32) -> Option<f32> {
    let world = entity.world_matrix();
    let inv = world.inverse();
    let origin = inv.transform_point3(ray.origin);
    let dir = inv.transform_vector3(ray.dir);
    if dir.z.abs() < 1e-8 {
        return None;
    }
    let t = -origin.z / dir.z;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let local_hit = origin + dir * t;
    let r = local_hit.truncate().length();
    if r < inner || r > outer {
        return None;
    }
    let world_hit = world.transform_point3(local_hit);
    Some((world_hit - ray.origin).length())
}

/// Test a single entity's mesh. Entities without a mesh never hit.
pub fn intersect_entity(ray: &Ray, entity: &Entity) -> Option<RayHit> {
    let mesh = entity.mesh.as_ref()?;
    let distance = match mesh.shape {
        Shape::Sphere { radius, .. } => {
            intersect_sphere(ray, entity.pos, radius * entity.scale.max_element())?
        }
        Shape::Ring { inner, outer, .. } => intersect_ring(ray, entity, inner, outer)?,
    };
    if !distance.is_finite() {
        return None;
    }
    Some(RayHit {
        id: entity.id,
        distance,
        point: ray.at(distance),
    })
}

/// Intersect a ray with the listed entities only (no descent into children).
/// Returns hits sorted nearest first; inactive or missing entities are skipped.
pub fn intersect_entities(
    ray: &Ray,
    scene: &Scene,
    ids: impl IntoIterator<Item = EntityId>,
) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = ids
        .into_iter()
        .filter_map(|id| scene.get(id))
        .filter(|e| e.active)
        .filter_map(|e| intersect_entity(ray, e))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, Material, MeshComponent};
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn ball(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, 16, Material::standard(Color::WHITE)))
    }

    #[test]
    fn sphere_hit_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = intersect_sphere(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(intersect_sphere(&ray, Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn sphere_off_axis_misses() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(intersect_sphere(&ray, Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn scaled_sphere_grows_hit_radius() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), Vec3::NEG_Z);
        let e = ball(1, Vec3::ZERO, 2.0).with_scale(Vec3::splat(2.0));
        assert!(intersect_entity(&ray, &e).is_some());
    }

    #[test]
    fn nearest_hit_sorts_first() {
        let mut scene = Scene::new();
        scene.spawn(ball(1, Vec3::new(0.0, 0.0, -20.0), 2.0));
        scene.spawn(ball(2, Vec3::new(0.0, 0.0, -5.0), 2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

        let hits = intersect_entities(&ray, &scene, [EntityId(1), EntityId(2)]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, EntityId(2));
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn unlisted_entities_are_ignored() {
        let mut scene = Scene::new();
        scene.spawn(ball(1, Vec3::ZERO, 5.0));
        scene.spawn(ball(2, Vec3::new(0.0, 0.0, -20.0), 2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

        let hits = intersect_entities(&ray, &scene, [EntityId(2)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, EntityId(2));
    }

    #[test]
    fn ring_hit_between_radii_only() {
        // Ring rotated into the XZ plane, viewed from above.
        let ring = Entity::new(EntityId(1))
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
            .with_mesh(MeshComponent::ring(2.0, 4.0, 32, Material::basic(Color::WHITE)));

        let down = |x: f32| Ray::new(Vec3::new(x, 10.0, 0.0), Vec3::NEG_Y);
        assert!(intersect_entity(&down(3.0), &ring).is_some());
        assert!(intersect_entity(&down(1.0), &ring).is_none());
        assert!(intersect_entity(&down(5.0), &ring).is_none());

        let hit = intersect_entity(&down(3.0), &ring).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-4);
    }

    #[test]
    fn nan_position_never_hits() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(intersect_sphere(&ray, Vec3::splat(f32::NAN), 2.0).is_none());

        let e = ball(1, Vec3::new(f32::NAN, 0.0, f32::NAN), 2.0);
        assert!(intersect_entity(&ray, &e).is_none());

        let ring = Entity::new(EntityId(2))
            .with_pos(Vec3::splat(f32::NAN))
            .with_mesh(MeshComponent::ring(2.0, 4.0, 32, Material::basic(Color::WHITE)));
        assert!(intersect_entity(&ray, &ring).is_none());
    }

    #[test]
    fn pivot_without_mesh_never_hits() {
        let pivot = Entity::new(EntityId(1));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(intersect_entity(&ray, &pivot).is_none());
    }
}
