use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::systems::raycast::Ray;

/// Render surface rectangle in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Surface anchored at the client origin.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// A surface with no area cannot be projected onto.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Normalize a client point to device coordinates in [-1, 1]², Y up.
    pub fn to_ndc(&self, client: Vec2) -> Vec2 {
        Vec2::new(
            (client.x - self.left) / self.width * 2.0 - 1.0,
            -((client.y - self.top) / self.height * 2.0 - 1.0),
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn to_client(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (ndc.x + 1.0) / 2.0 * self.width,
            self.top + (1.0 - ndc.y) / 2.0 * self.height,
        )
    }
}

/// GPU-side uniform data for the camera: 40 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// World position, w = 1.
    pub position: [f32; 4],
    /// Vertical FOV (radians), aspect, near, far.
    pub params: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 40;
}

/// Perspective camera looking from `position` at `target`.
/// Right-handed, Y up, OpenGL clip depth in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_deg: 55.0,
            aspect: 1.0,
            near: 0.1,
            far: 5000.0,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Adopt the aspect ratio of a resized surface.
    /// Degenerate (zero-area) surfaces leave the projection unchanged.
    pub fn resize(&mut self, viewport: &Viewport) {
        if viewport.is_degenerate() {
            log::warn!("ignoring resize to degenerate surface {viewport:?}");
            return;
        }
        self.aspect = viewport.aspect();
    }

    /// Project a world point into normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// Map a point in normalized device coordinates back to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Ray from the camera through a point on the image plane.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let on_plane = self.unproject(ndc.extend(0.5));
        Ray::new(self.position, on_plane - self.position)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
            params: [self.fov_y_deg.to_radians(), self.aspect, self.near, self.far],
        }
    }
}
