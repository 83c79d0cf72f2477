/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh geometry primitive. Dimensions are in local (unscaled) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// UV sphere centred on the entity origin.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32, segments: u32 },
}

/// Shading model for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Lit by scene lights (roughness/metalness workflow).
    #[default]
    Standard,
    /// Unlit flat color; used for emitters such as the sun.
    Basic,
}

/// Index into the texture slots registered with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSlot(pub u32);

/// Surface appearance of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub double_sided: bool,
    /// Color map. When set, `color` acts as a tint (white by default).
    pub texture: Option<TextureSlot>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Standard,
            color: Color::WHITE,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            double_sided: false,
            texture: None,
        }
    }
}

impl Material {
    /// Lit material with a flat color.
    pub fn standard(color: Color) -> Self {
        Self { color, ..Default::default() }
    }

    /// Lit material sampling a texture; base color stays white.
    pub fn textured(texture: TextureSlot) -> Self {
        Self { texture: Some(texture), ..Default::default() }
    }

    /// Unlit flat-colored material.
    pub fn basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            ..Default::default()
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// Renderable mesh attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(radius: f32, segments: u32, material: Material) -> Self {
        Self::new(Shape::Sphere { radius, segments }, material)
    }

    pub fn ring(inner: f32, outer: f32, segments: u32, material: Material) -> Self {
        Self::new(Shape::Ring { inner, outer, segments }, material)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_unpacks_channels() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn textured_material_keeps_white_base() {
        let m = Material::textured(TextureSlot(3));
        assert_eq!(m.color, Color::WHITE);
        assert_eq!(m.texture, Some(TextureSlot(3)));
        assert_eq!(m.kind, MaterialKind::Standard);
    }

    #[test]
    fn basic_material_is_unlit() {
        let m = Material::basic(Color::from_hex(0xffdd88));
        assert_eq!(m.kind, MaterialKind::Basic);
        assert!(m.texture.is_none());
    }
}
