pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{Color, Material, MaterialKind, MeshComponent, Shape, TextureSlot};
pub use core::frame::{CancelHandle, FrameLoop};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use renderer::camera::{CameraUniform, PerspectiveCamera, Viewport};
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::TextureRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{PointLight, LightState};
pub use systems::lines::{circle_xz, LineBuffer, LineStrip, LineVertex};
pub use systems::raycast::{Ray, RayHit};
pub use systems::starfield::{StarField, StarPoint};

pub use extensions::{TransformGraph, LocalTransform};
