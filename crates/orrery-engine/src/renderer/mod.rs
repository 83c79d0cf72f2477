pub mod camera;
pub mod instance;

pub use camera::{CameraUniform, PerspectiveCamera, Viewport};
pub use instance::{MeshInstance, RenderBuffer};
