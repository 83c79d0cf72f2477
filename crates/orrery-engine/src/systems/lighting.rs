/// Scene lighting: one ambient term plus persistent point lights.
///
/// Lights stay until explicitly removed. Each frame the runner exposes
/// the light list to the renderer's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// A 3D point light.
///
/// Wire format (12 floats / 48 bytes):
/// `[x, y, z, distance, r, g, b, intensity, decay, pad×3]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Cutoff distance; 0 means unbounded.
    pub distance: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Physical falloff exponent.
    pub decay: f32,
    _pad: [f32; 3],
}

impl PointLight {
    /// Create a point light at `pos`. Unbounded range, inverse-square decay.
    pub fn new(pos: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            distance: 0.0,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            decay: 2.0,
            _pad: [0.0; 3],
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Manages active lights and ambient light for the scene.
///
/// The ambient term defaults to white at full intensity, which produces
/// unlit output when no lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
    ambient_intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: Color::WHITE,
            ambient_intensity: 1.0,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light. A dark space scene wants something like
    /// a deep blue at low intensity.
    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }

    /// Pointer to the light data for direct reads from linear memory.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_defaults() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), Color::WHITE, 2.2);
        assert_eq!(light.pos(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.intensity, 2.2);
        assert_eq!(light.distance, 0.0);
        assert_eq!(light.decay, 2.0);
    }

    #[test]
    fn light_state_counts_added_lights() {
        let mut state = LightState::new();
        assert_eq!(state.count(), 0);
        state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 1.0));
        state.add(PointLight::new(Vec3::X, Color::WHITE, 0.5));
        assert_eq!(state.count(), 2);
    }

    #[test]
    fn ambient_defaults_to_white() {
        let state = LightState::new();
        assert_eq!(state.ambient(), Color::WHITE);
        assert_eq!(state.ambient_intensity(), 1.0);
    }

    #[test]
    fn set_ambient() {
        let mut state = LightState::new();
        state.set_ambient(Color::from_hex(0x223355), 0.25);
        assert_eq!(state.ambient(), Color::from_hex(0x223355));
        assert_eq!(state.ambient_intensity(), 0.25);
    }

    #[test]
    fn point_light_is_12_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
