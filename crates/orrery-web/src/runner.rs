use orrery_engine::{
    AssetManifest, CameraUniform, CancelHandle, EngineContext, FrameLoop, Game, GameConfig,
    InputEvent, InputQueue, ProtocolLayout, RenderBuffer, RenderContext, TextureRegistry,
    TextureSlot, Viewport,
};
use orrery_engine::bridge::protocol::{self as proto, HEADER_FLOATS, PROTOCOL_VERSION};
use orrery_engine::systems::render::build_render_buffer;

/// Generic runner that wires a `Game` to the engine frame loop.
///
/// Each concrete scene creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_game!`](crate::export_game)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    frames: FrameLoop,
    config: GameConfig,
    layout: ProtocolLayout,
    camera: CameraUniform,
    header: [f32; HEADER_FLOATS],
    pixel_ratio: f32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::with_config(&config);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            frames: FrameLoop::new(),
            layout,
            config,
            camera,
            header: [0.0; HEADER_FLOATS],
            pixel_ratio: 1.0,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_frame_data();
    }

    /// Push an input event into the queue. Consumed by the next tick.
    /// Once the frame loop is stopped no tick will drain the queue, so the
    /// event is dropped.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.frames.is_running() {
            log::debug!("frame loop stopped, dropping {event:?}");
            return;
        }
        self.input.push(event);
    }

    /// Apply a new surface rectangle right away, and let the game see it
    /// on the next tick.
    pub fn resize(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.ctx.resize(Viewport::new(left, top, width, height));
        self.camera = self.ctx.camera.uniform();
        self.push_input(InputEvent::Resize { left, top, width, height });
    }

    /// Events waiting for the next tick.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Run one frame: update the game on queued input, then rebuild the
    /// buffers the renderer reads. Does nothing once stopped.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        let ran = self.frames.step(|_| {
            self.ctx.clear_frame_data();
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
        });
        if ran {
            self.rebuild_frame_data();
        } else {
            // Cancelled through a handle with events still queued.
            self.input.drain();
        }
    }

    /// Run `n` frames back to back. Returns how many actually ran.
    pub fn run_frames(&mut self, n: u32) -> u32 {
        let start = self.frames.frame();
        for _ in 0..n {
            if !self.frames.is_running() {
                break;
            }
            self.tick();
        }
        (self.frames.frame() - start) as u32
    }

    /// Cancel the frame loop. Later ticks are no-ops.
    pub fn stop(&mut self) {
        if self.frames.is_running() {
            log::info!("frame loop stopped after {} frames", self.frames.frame());
        }
        self.frames.cancel();
        self.input.drain();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.frames.cancel_handle()
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Parse a texture manifest and hand the resulting slots to the game.
    /// A malformed manifest is logged and ignored; the scene keeps its
    /// flat-colored materials.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.ctx.textures = TextureRegistry::from_manifest(&manifest);
                log::info!("texture manifest loaded: {} textures", self.ctx.textures.len());
                self.game.textures_loaded(&mut self.ctx);
                self.rebuild_frame_data();
            }
            Err(e) => log::warn!("ignoring texture manifest: {e}"),
        }
    }

    fn rebuild_frame_data(&mut self) {
        self.ctx.graph.propagate(&mut self.ctx.scene);
        build_render_buffer(
            self.ctx.scene.iter(),
            &mut self.render_buffer,
            self.layout.max_instances,
        );
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }
        self.camera = self.ctx.camera.uniform();
        self.write_header();
    }

    fn write_header(&mut self) {
        let h = &mut self.header;
        h[proto::HEADER_LOCK] = 0.0;
        h[proto::HEADER_FRAME_COUNTER] = self.frames.frame() as f32;
        h[proto::HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        h[proto::HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        h[proto::HEADER_MAX_LIGHTS] = self.layout.max_lights as f32;
        h[proto::HEADER_LIGHT_COUNT] = self.ctx.lights.count().min(self.layout.max_lights) as f32;
        h[proto::HEADER_MAX_LINE_VERTICES] = self.layout.max_line_vertices as f32;
        h[proto::HEADER_LINE_VERTEX_COUNT] = self.ctx.lines.vertex_count() as f32;
        h[proto::HEADER_MAX_STARS] = self.layout.max_stars as f32;
        h[proto::HEADER_STAR_COUNT] = self.ctx.stars.count().min(self.layout.max_stars) as f32;
        h[proto::HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[proto::HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[proto::HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[proto::HEADER_AMBIENT_INTENSITY] = self.ctx.lights.ambient_intensity();
        h[proto::HEADER_STAR_SIZE] = self.ctx.stars.size;
        h[proto::HEADER_PIXEL_RATIO] = self.pixel_ratio;
    }

    // ---- Game access (scene-specific exports go through these) ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame()
    }

    pub fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        self.header[proto::HEADER_PIXEL_RATIO] = ratio;
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn texture_path(&self, slot: u32) -> Option<String> {
        self.ctx.textures.path(TextureSlot(slot)).map(str::to_owned)
    }

    pub fn texture_count(&self) -> u32 {
        self.ctx.textures.len() as u32
    }

    // ---- Pointer accessors for direct linear-memory reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn ambient(&self) -> [f32; 4] {
        let c = self.ctx.lights.ambient();
        [c.r, c.g, c.b, self.ctx.lights.ambient_intensity()]
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.ctx.lines.vertices_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.ctx.lines.vertex_count() as u32
    }

    pub fn line_strips_ptr(&self) -> *const u32 {
        self.ctx.lines.strips_ptr()
    }

    pub fn line_strip_count(&self) -> u32 {
        self.ctx.lines.strip_count() as u32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.ctx.stars.buffer_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.ctx.stars.count().min(self.layout.max_stars) as u32
    }

    pub fn star_size(&self) -> f32 {
        self.ctx.stars.size
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn max_stars(&self) -> u32 {
        self.layout.max_stars as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
