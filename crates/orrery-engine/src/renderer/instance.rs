use bytemuck::{Pod, Zeroable};
use crate::components::mesh::{MaterialKind, MeshComponent, Shape};

/// Per-mesh render data written to linear memory for the TypeScript renderer.
/// Must match the TypeScript protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// Texture slot, or -1 for a flat-colored surface.
    pub texture: f32,
    /// 0 = standard (lit), 1 = basic (unlit).
    pub material: f32,
    /// 0 = sphere, 1 = ring.
    pub shape: f32,
    /// Sphere: radius. Ring: inner radius.
    pub p0: f32,
    /// Sphere: segment count. Ring: outer radius.
    pub p1: f32,
    /// Ring: segment count. Sphere: 0.
    /// Sign carries the double-sided flag (negative = double sided).
    pub p2: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const SHAPE_SPHERE: f32 = 0.0;
    pub const SHAPE_RING: f32 = 1.0;

    /// Pack a mesh component placed at `model`.
    pub fn from_mesh(model: [f32; 16], mesh: &MeshComponent) -> Self {
        let m = &mesh.material;
        let (shape, p0, p1, segments) = match mesh.shape {
            Shape::Sphere { radius, segments } => (Self::SHAPE_SPHERE, radius, segments as f32, 0.0),
            Shape::Ring { inner, outer, segments } => (Self::SHAPE_RING, inner, outer, segments as f32),
        };
        Self {
            model,
            r: m.color.r,
            g: m.color.g,
            b: m.color.b,
            opacity: m.opacity,
            roughness: m.roughness,
            metalness: m.metalness,
            texture: m.texture.map_or(-1.0, |slot| slot.0 as f32),
            material: match m.kind {
                MaterialKind::Standard => 0.0,
                MaterialKind::Basic => 1.0,
            },
            shape,
            p0,
            p1,
            p2: if m.double_sided { -segments.max(1.0) } else { segments },
        }
    }

    pub fn is_double_sided(&self) -> bool {
        self.p2 < 0.0
    }
}

impl Default for MeshInstance {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Render buffer containing all mesh instances for the frame.
pub struct RenderBuffer {
    pub instances: Vec<MeshInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for direct reads from linear memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, Material, TextureSlot};
    use glam::Mat4;

    #[test]
    fn mesh_instance_is_28_floats() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
    }

    #[test]
    fn sphere_packs_radius_and_flat_color() {
        let mesh = MeshComponent::sphere(5.0, 42, Material::standard(Color::from_hex(0x3b82f6)));
        let inst = MeshInstance::from_mesh(Mat4::IDENTITY.to_cols_array(), &mesh);
        assert_eq!(inst.shape, MeshInstance::SHAPE_SPHERE);
        assert_eq!(inst.p0, 5.0);
        assert_eq!(inst.p1, 42.0);
        assert_eq!(inst.texture, -1.0);
        assert_eq!(inst.roughness, 1.0);
        assert!(!inst.is_double_sided());
    }

    #[test]
    fn double_sided_ring_carries_flag() {
        let mat = Material::standard(Color::from_hex(0xf5e6b3)).with_opacity(0.6).double_sided();
        let mesh = MeshComponent::ring(1.35, 2.2, 64, mat);
        let inst = MeshInstance::from_mesh(Mat4::IDENTITY.to_cols_array(), &mesh);
        assert_eq!(inst.shape, MeshInstance::SHAPE_RING);
        assert_eq!(inst.p2, -64.0);
        assert!(inst.is_double_sided());
        assert!((inst.opacity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn textured_material_writes_slot() {
        let mesh = MeshComponent::sphere(1.0, 8, Material::textured(TextureSlot(2)));
        let inst = MeshInstance::from_mesh(Mat4::IDENTITY.to_cols_array(), &mesh);
        assert_eq!(inst.texture, 2.0);
        assert_eq!((inst.r, inst.g, inst.b), (1.0, 1.0, 1.0));
    }
}
