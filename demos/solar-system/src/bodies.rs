/// Body table and scene constants.
///
/// Sizes and distances are stylized scene units, readable on screen rather
/// than to scale. Periods are real sidereal periods in days; they only set
/// the relative pace of the orbits.

use orrery_engine::Color;

/// Orbit period that advances at exactly the base rate.
pub const REFERENCE_PERIOD_DAYS: f32 = 365.0;
/// Orbit angle (radians) a reference-period body gains per frame at speed 1.
pub const BASE_ORBIT_RATE: f32 = 0.002;
/// Sun self-rotation per frame, independent of the speed control.
pub const SUN_SPIN_RATE: f32 = 0.002;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 18.0;
pub const SUN_SEGMENTS: u32 = 48;
pub const SUN_COLOR: Color = Color::from_hex(0xffdd88);

// ── Planets ──────────────────────────────────────────────────────────

pub const PLANET_SEGMENTS: u32 = 42;

pub const ORBIT_LINE_SEGMENTS: u32 = 256;
pub const ORBIT_LINE_COLOR: Color = Color::from_hex(0x223355);
pub const ORBIT_LINE_OPACITY: f32 = 0.55;

/// Flat ring around a body, sized relative to the body radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub inner_factor: f32,
    pub outer_factor: f32,
    pub segments: u32,
    pub color: Color,
    pub opacity: f32,
}

pub const SATURN_RING: RingSpec = RingSpec {
    inner_factor: 1.35,
    outer_factor: 2.2,
    segments: 64,
    color: Color::from_hex(0xf5e6b3),
    opacity: 0.6,
};

/// One orbiting body. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    /// Stable identifier; also the texture manifest key.
    pub key: &'static str,
    pub name: &'static str,
    pub radius: f32,
    pub orbit_distance: f32,
    pub orbit_period_days: f32,
    /// Self-rotation in radians per frame at speed 1.
    pub spin_rate: f32,
    pub color: Color,
    pub text: String,
    pub ring: Option<RingSpec>,
}

impl CelestialBody {
    fn new(
        key: &'static str,
        name: &'static str,
        radius: f32,
        orbit_distance: f32,
        orbit_period_days: f32,
        spin_rate: f32,
        color: u32,
    ) -> Self {
        Self {
            key,
            name,
            radius,
            orbit_distance,
            orbit_period_days,
            spin_rate,
            color: Color::from_hex(color),
            text: format!("{name}: placeholder text."),
            ring: None,
        }
    }

    fn with_ring(mut self, ring: RingSpec) -> Self {
        self.ring = Some(ring);
        self
    }
}

/// The eight planets, innermost first.
pub fn default_bodies() -> Vec<CelestialBody> {
    vec![
        CelestialBody::new("mercury", "Mercury", 2.2, 38.0, 88.0, 0.004, 0x8c8c8c),
        CelestialBody::new("venus", "Venus", 4.8, 54.0, 225.0, 0.0016, 0xd9b27c),
        CelestialBody::new("earth", "Earth", 5.0, 74.0, 365.0, 0.02, 0x3b82f6),
        CelestialBody::new("mars", "Mars", 2.7, 96.0, 687.0, 0.018, 0xc2410c),
        CelestialBody::new("jupiter", "Jupiter", 13.5, 132.0, 4333.0, 0.05, 0xd2b48c),
        CelestialBody::new("saturn", "Saturn", 11.5, 170.0, 10759.0, 0.045, 0xeab308)
            .with_ring(SATURN_RING),
        CelestialBody::new("uranus", "Uranus", 8.0, 210.0, 30687.0, 0.03, 0x67e8f9),
        CelestialBody::new("neptune", "Neptune", 7.8, 250.0, 60190.0, 0.032, 0x2563eb),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_are_ordered_outward() {
        let bodies = default_bodies();
        assert_eq!(bodies.len(), 8);
        assert!(bodies.windows(2).all(|w| w[0].orbit_distance < w[1].orbit_distance));
    }

    #[test]
    fn only_saturn_has_a_ring() {
        let ringed: Vec<_> = default_bodies()
            .into_iter()
            .filter(|b| b.ring.is_some())
            .map(|b| b.key)
            .collect();
        assert_eq!(ringed, vec!["saturn"]);
    }

    #[test]
    fn text_names_the_body() {
        for body in default_bodies() {
            assert!(body.text.starts_with(body.name));
        }
    }
}
