use bytemuck::{Pod, Zeroable};
use std::f32::consts::TAU;
use crate::components::mesh::Color;
use crate::core::rng::Rng;

/// One background star. Wire format: `[x, y, z]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StarPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Static point cloud rendered behind the scene.
/// All points share one color and one point size.
pub struct StarField {
    points: Vec<StarPoint>,
    pub color: Color,
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
}

impl StarField {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            color: Color::WHITE,
            size: 1.0,
            size_attenuation: true,
        }
    }

    /// Scatter `count` points uniformly through a ball of `radius`.
    ///
    /// The cube root on the radial draw keeps density uniform in volume.
    pub fn generate(&mut self, rng: &mut Rng, count: usize, radius: f32) {
        self.points.clear();
        self.points.reserve(count);
        for _ in 0..count {
            let r = radius * rng.next_f32().cbrt();
            let theta = rng.next_f32() * TAU;
            let phi = (2.0 * rng.next_f32() - 1.0).acos();
            self.points.push(StarPoint {
                x: r * phi.sin() * theta.cos(),
                y: r * phi.cos(),
                z: r * phi.sin() * theta.sin(),
            });
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn points(&self) -> &[StarPoint] {
        &self.points
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self::new()
    }
}
