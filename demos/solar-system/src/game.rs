/// Solar System: stylized orrery with circular orbits and click-to-inspect.
///
/// Scene graph: system group → orbit container (spins about Y to carry the
/// body round) → body mesh (offset by orbit distance, spins about its own Y)
/// → optional ring.

use std::f32::consts::FRAC_PI_2;
use glam::{Quat, Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::{self, CelestialBody};
use crate::orbit::OrbitModel;
use crate::picking::PickTable;
use crate::ui::{self, InfoPanel};

// ── Camera ───────────────────────────────────────────────────────────

const CAMERA_FOV_DEG: f32 = 55.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 5000.0;
const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 180.0, 420.0);

// ── Lights ───────────────────────────────────────────────────────────

const AMBIENT_COLOR: u32 = 0x223355;
const AMBIENT_INTENSITY: f32 = 0.25;
const SUN_LIGHT_INTENSITY: f32 = 2.2;
const SUN_LIGHT_DECAY: f32 = 2.0;

// ── Stars ────────────────────────────────────────────────────────────

const STAR_COUNT: usize = 4000;
const STAR_RADIUS: f32 = 2000.0;
const STAR_SIZE: f32 = 1.2;

// ── Custom event kinds from the host UI ──────────────────────────────

/// a = new speed multiplier.
const CUSTOM_SET_SPEED: u32 = 1;
const CUSTOM_CLOSE_PANEL: u32 = 2;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = panel visible (0/1), b = body index or -1, c = current speed.
const EVENT_PANEL: f32 = 1.0;

const DEFAULT_SPEED: f32 = 1.0;

/// Entities created for one body.
#[derive(Debug, Clone, Copy)]
struct BodyHandles {
    container: EntityId,
    mesh: EntityId,
}

/// Choose a planet surface: textured when a slot is available, flat color otherwise.
fn planet_material(color: Color, texture: Option<TextureSlot>) -> Material {
    let material = match texture {
        Some(slot) => Material::textured(slot),
        None => Material::standard(color),
    };
    material.with_roughness(1.0).with_metalness(0.0)
}

pub struct SolarSystem {
    model: OrbitModel,
    handles: Vec<BodyHandles>,
    picks: PickTable,
    panel: InfoPanel,
    /// Orbit and spin multiplier. Unconstrained: negative reverses, NaN stalls.
    speed: f32,
    sun_id: Option<EntityId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_bodies(bodies::default_bodies())
    }

    pub fn with_bodies(bodies: Vec<CelestialBody>) -> Self {
        Self {
            model: OrbitModel::new(bodies),
            handles: Vec::new(),
            picks: PickTable::new(),
            panel: InfoPanel::new(),
            speed: DEFAULT_SPEED,
            sun_id: None,
        }
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn close_panel(&mut self) {
        self.panel.close();
    }

    pub fn model(&self) -> &OrbitModel {
        &self.model
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Apply the raw text of the speed control.
    pub fn set_speed_input(&mut self, text: &str) {
        self.speed = ui::coerce_number(text);
        if self.speed.is_nan() {
            log::warn!("speed input {text:?} is not a number; motion stalls");
        }
    }

    /// Mesh entity of body `index`.
    pub fn body_mesh(&self, index: usize) -> Option<EntityId> {
        self.handles.get(index).map(|h| h.mesh)
    }

    pub fn sun(&self) -> Option<EntityId> {
        self.sun_id
    }

    // ── Scene construction ───────────────────────────────────────────

    fn build_lights(ctx: &mut EngineContext) {
        ctx.lights.set_ambient(Color::from_hex(AMBIENT_COLOR), AMBIENT_INTENSITY);
        ctx.lights.add(
            PointLight::new(Vec3::ZERO, Color::WHITE, SUN_LIGHT_INTENSITY)
                .with_distance(0.0)
                .with_decay(SUN_LIGHT_DECAY),
        );
    }

    fn build_stars(ctx: &mut EngineContext) {
        let mut stars = StarField::new().with_color(Color::WHITE).with_size(STAR_SIZE);
        stars.generate(&mut ctx.rng, STAR_COUNT, STAR_RADIUS);
        ctx.stars = stars;
    }

    fn build_sun(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("sun")
                .with_mesh(MeshComponent::sphere(
                    bodies::SUN_RADIUS,
                    bodies::SUN_SEGMENTS,
                    Material::basic(bodies::SUN_COLOR),
                )),
        );
        ctx.graph.register(id);
        self.sun_id = Some(id);
    }

    fn build_body(
        &mut self,
        ctx: &mut EngineContext,
        system: EntityId,
        index: usize,
        body: &CelestialBody,
    ) {
        ctx.lines.push_strip(
            &circle_xz(body.orbit_distance, bodies::ORBIT_LINE_SEGMENTS),
            bodies::ORBIT_LINE_COLOR,
            bodies::ORBIT_LINE_OPACITY,
        );

        let container = ctx.next_id();
        ctx.scene.spawn(Entity::new(container).with_tag(format!("{}-orbit", body.key)));
        ctx.graph.attach(container, system, LocalTransform::new());

        let mesh = ctx.next_id();
        let texture = ctx.textures.slot(body.key);
        ctx.scene.spawn(
            Entity::new(mesh)
                .with_tag(body.key)
                .with_mesh(MeshComponent::sphere(
                    body.radius,
                    bodies::PLANET_SEGMENTS,
                    planet_material(body.color, texture),
                )),
        );
        ctx.graph.attach(
            mesh,
            container,
            LocalTransform::new().with_offset(Vec3::new(body.orbit_distance, 0.0, 0.0)),
        );

        if let Some(ring) = body.ring {
            let ring_id = ctx.next_id();
            let material = Material::basic(ring.color)
                .with_opacity(ring.opacity)
                .double_sided();
            ctx.scene.spawn(
                Entity::new(ring_id)
                    .with_tag(format!("{}-ring", body.key))
                    .with_mesh(MeshComponent::ring(
                        body.radius * ring.inner_factor,
                        body.radius * ring.outer_factor,
                        ring.segments,
                        material,
                    )),
            );
            ctx.graph.attach(
                ring_id,
                mesh,
                LocalTransform::new().with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            );
        }

        self.picks.insert(mesh, index);
        self.handles.push(BodyHandles { container, mesh });
    }

    // ── Per-frame ────────────────────────────────────────────────────

    fn handle_click(&mut self, ctx: &EngineContext, x: f32, y: f32) {
        let ray = ctx.ray_from_client(Vec2::new(x, y));
        let Some(pick) = self.picks.pick(&ray, &ctx.scene) else {
            log::debug!("click at ({x}, {y}) hit no body");
            return;
        };
        let Some(body) = self.model.body(pick.body) else {
            return;
        };
        log::debug!("picked {} at distance {:.1}", body.name, pick.hit.distance);
        self.panel.show(pick.body, body);
    }

    fn write_rotations(&self, ctx: &mut EngineContext) {
        for (handles, state) in self.handles.iter().zip(self.model.states()) {
            ctx.graph
                .set_rotation(handles.container, Quat::from_rotation_y(state.orbit_angle));
            ctx.graph
                .set_rotation(handles.mesh, Quat::from_rotation_y(state.spin_angle));
        }
        if let Some(sun) = self.sun_id {
            ctx.graph.set_rotation(sun, Quat::from_rotation_y(self.model.sun_spin()));
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 32,
            max_lights: 2,
            max_line_vertices: (self.model.len() * (bodies::ORBIT_LINE_SEGMENTS as usize + 1)).max(1),
            max_stars: STAR_COUNT,
            max_events: 8,
            seed: orrery_web::entropy_seed(),
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.camera = PerspectiveCamera::new(
            CAMERA_FOV_DEG,
            ctx.viewport.aspect(),
            CAMERA_NEAR,
            CAMERA_FAR,
        )
        .with_position(CAMERA_POSITION)
        .looking_at(Vec3::ZERO);

        Self::build_lights(ctx);
        Self::build_stars(ctx);
        self.build_sun(ctx);

        let system = ctx.next_id();
        ctx.scene.spawn(Entity::new(system).with_tag("system"));
        ctx.graph.register(system);

        let bodies = self.model.bodies().to_vec();
        for (index, body) in bodies.iter().enumerate() {
            self.build_body(ctx, system, index, body);
        }

        ctx.graph.propagate(&mut ctx.scene);
        log::info!(
            "solar system built: {} bodies, {} stars, {} orbit lines",
            self.model.len(),
            ctx.stars.count(),
            ctx.lines.strip_count()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::Click { x, y } => self.handle_click(ctx, x, y),
                InputEvent::Custom { kind, a, .. } => match kind {
                    CUSTOM_SET_SPEED => self.speed = a,
                    CUSTOM_CLOSE_PANEL => self.panel.close(),
                    _ => log::warn!("unknown custom event kind {kind}"),
                },
                InputEvent::Resize { width, height, .. } => {
                    log::debug!("surface resized to {width}x{height}");
                }
            }
        }

        // ── Advance orbits ───────────────────────────────────────────
        self.model.advance(self.speed);
        self.write_rotations(ctx);
        ctx.graph.propagate(&mut ctx.scene);

        // ── Emit game events ─────────────────────────────────────────
        ctx.emit_event(GameEvent {
            kind: EVENT_PANEL,
            a: if self.panel.visible { 1.0 } else { 0.0 },
            b: self.panel.body.map_or(-1.0, |i| i as f32),
            c: self.speed,
        });
    }

    fn textures_loaded(&mut self, ctx: &mut EngineContext) {
        for (body, handles) in self.model.bodies().iter().zip(&self.handles) {
            let texture = ctx.textures.slot(body.key);
            if let Some(mesh) = ctx.scene.get_mut(handles.mesh).and_then(|e| e.mesh.as_mut()) {
                mesh.material = planet_material(body.color, texture);
            }
        }
    }
}
