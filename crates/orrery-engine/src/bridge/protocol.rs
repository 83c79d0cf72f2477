/// Linear-memory layout shared with the TypeScript renderer.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 40 floats]
/// [Instances: max_instances × 28 floats]
/// [Lights: max_lights × 12 floats]
/// [Line vertices: max_line_vertices × 7 floats]
/// [Stars: max_stars × 3 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The offsets size a single staging buffer on the host. Each section is
/// still read through its own `get_*_ptr` export, so the sections are not
/// adjacent in linear memory.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LIGHTS: usize = 4;
pub const HEADER_LIGHT_COUNT: usize = 5;
pub const HEADER_MAX_LINE_VERTICES: usize = 6;
pub const HEADER_LINE_VERTEX_COUNT: usize = 7;
pub const HEADER_MAX_STARS: usize = 8;
pub const HEADER_STAR_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;
pub const HEADER_AMBIENT_INTENSITY: usize = 13;
pub const HEADER_STAR_SIZE: usize = 14;
pub const HEADER_PIXEL_RATIO: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera uniform: view, projection, position, params.
pub const CAMERA_FLOATS: usize = 40;

/// Floats per mesh instance: model matrix + material + shape.
pub const INSTANCE_FLOATS: usize = 28;

/// Floats per point light: x, y, z, distance, r, g, b, intensity, decay, pad×3.
pub const LIGHT_FLOATS: usize = 12;

/// Floats per line vertex: x, y, z, r, g, b, a.
pub const LINE_VERTEX_FLOATS: usize = 7;

/// Floats per star point: x, y, z.
pub const STAR_FLOATS: usize = 3;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_line_vertices: usize,
    pub max_stars: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub light_data_floats: usize,
    pub line_data_floats: usize,
    pub star_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where the camera uniform begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    pub light_data_offset: usize,
    pub line_data_offset: usize,
    pub star_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_instances: usize,
        max_lights: usize,
        max_line_vertices: usize,
        max_stars: usize,
        max_events: usize,
    ) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let line_data_floats = max_line_vertices * LINE_VERTEX_FLOATS;
        let star_data_floats = max_stars * STAR_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let light_data_offset = instance_data_offset + instance_data_floats;
        let line_data_offset = light_data_offset + light_data_floats;
        let star_data_offset = line_data_offset + line_data_floats;
        let event_data_offset = star_data_offset + star_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_lights,
            max_line_vertices,
            max_stars,
            max_events,
            instance_data_floats,
            light_data_floats,
            line_data_floats,
            star_data_floats,
            event_data_floats,
            camera_offset,
            instance_data_offset,
            light_data_offset,
            line_data_offset,
            star_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_lights,
            config.max_line_vertices,
            config.max_stars,
            config.max_events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;
    use crate::renderer::camera::CameraUniform;
    use crate::renderer::instance::MeshInstance;
    use crate::systems::lighting::PointLight;
    use crate::systems::lines::LineVertex;
    use crate::systems::starfield::StarPoint;

    #[test]
    fn wire_structs_match_float_counts() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CAMERA_FLOATS * 4);
        assert_eq!(std::mem::size_of::<MeshInstance>(), INSTANCE_FLOATS * 4);
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
        assert_eq!(std::mem::size_of::<LineVertex>(), LINE_VERTEX_FLOATS * 4);
        assert_eq!(std::mem::size_of::<StarPoint>(), STAR_FLOATS * 4);
        assert_eq!(std::mem::size_of::<GameEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(16, 4, 2400, 4000, 32);

        assert_eq!(layout.instance_data_floats, 16 * 28);
        assert_eq!(layout.light_data_floats, 4 * 12);
        assert_eq!(layout.line_data_floats, 2400 * 7);
        assert_eq!(layout.star_data_floats, 4000 * 3);
        assert_eq!(layout.event_data_floats, 32 * 4);

        let expected_total = HEADER_FLOATS + CAMERA_FLOATS
            + 16 * 28
            + 4 * 12
            + 2400 * 7
            + 4000 * 3
            + 32 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.light_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.line_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.star_data_offset, layout.line_data_offset + layout.line_data_floats);
        assert_eq!(layout.event_data_offset, layout.star_data_offset + layout.star_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_fields_fit_header() {
        assert!(HEADER_PIXEL_RATIO < HEADER_FLOATS);
    }
}
