use glam::Vec2;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::TextureRegistry;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::renderer::instance::RenderBuffer;
use crate::systems::lighting::LightState;
use crate::systems::lines::LineBuffer;
use crate::systems::raycast::Ray;
use crate::systems::starfield::StarField;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum number of mesh instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Maximum number of line vertices across all strips (default: 4096).
    pub max_line_vertices: usize,
    /// Maximum number of star points (default: 4096).
    pub max_stars: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the engine RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_instances: 64,
            max_lights: 4,
            max_line_vertices: 4096,
            max_stars: 4096,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every scene must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the initial scene: entities, hierarchy, lights, static geometry.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame. Consume input, advance state, leave world transforms current.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Called after a texture manifest has been loaded into `ctx.textures`.
    fn textures_loaded(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub lights: LightState,
    pub stars: StarField,
    pub lines: LineBuffer,
    pub textures: TextureRegistry,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Preallocate every buffer from the config capacities.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            graph: TransformGraph::new(),
            camera: PerspectiveCamera::default(),
            viewport: Viewport::sized(1.0, 1.0),
            lights: LightState::with_capacity(config.max_lights),
            stars: StarField::new(),
            lines: LineBuffer::with_capacity(config.max_line_vertices),
            textures: TextureRegistry::new(),
            events: Vec::with_capacity(config.max_events),
            rng: Rng::new(config.seed),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full, dropping {event:?}");
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Adopt a new render surface rectangle. Only the projection changes.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_degenerate() {
            log::warn!("ignoring degenerate viewport {viewport:?}");
            return;
        }
        self.viewport = viewport;
        self.camera.resize(&viewport);
    }

    /// Ray from the camera through a client-space point on the surface.
    pub fn ray_from_client(&self, client: Vec2) -> Ray {
        self.camera.ray_through(self.viewport.to_ndc(client))
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
