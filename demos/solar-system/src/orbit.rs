/// Circular orbit bookkeeping: one orbit angle and one spin angle per body.
///
/// Angular rate is inversely proportional to the orbit period. This is a
/// readable pacing rule, not Keplerian motion.

use crate::bodies::{CelestialBody, BASE_ORBIT_RATE, REFERENCE_PERIOD_DAYS, SUN_SPIN_RATE};

/// Orbit angle gained per frame at speed `speed`.
pub fn orbit_rate(period_days: f32, speed: f32) -> f32 {
    (REFERENCE_PERIOD_DAYS / period_days) * BASE_ORBIT_RATE * speed
}

/// Per-body animation state, in radians about +Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitState {
    pub orbit_angle: f32,
    pub spin_angle: f32,
}

/// Registry of the bodies and their orbit state, indexed in body order.
#[derive(Debug, Clone)]
pub struct OrbitModel {
    bodies: Vec<CelestialBody>,
    states: Vec<OrbitState>,
    sun_spin: f32,
}

impl OrbitModel {
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        let states = vec![OrbitState::default(); bodies.len()];
        Self {
            bodies,
            states,
            sun_spin: 0.0,
        }
    }

    /// Advance every body by one frame at `speed`.
    ///
    /// Negative speed runs backwards, zero freezes the bodies, and NaN
    /// poisons the angles. The sun spins at a fixed rate regardless.
    pub fn advance(&mut self, speed: f32) {
        for (body, state) in self.bodies.iter().zip(self.states.iter_mut()) {
            state.orbit_angle += orbit_rate(body.orbit_period_days, speed);
            state.spin_angle += body.spin_rate * speed;
        }
        self.sun_spin += SUN_SPIN_RATE;
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn states(&self) -> &[OrbitState] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&OrbitState> {
        self.states.get(index)
    }

    pub fn sun_spin(&self) -> f32 {
        self.sun_spin
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
