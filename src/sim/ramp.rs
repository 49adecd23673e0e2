//! Ramped scalar parameters
//!
//! A ramp climbs linearly toward its cap and then holds. Turn speed, drift
//! speed, the speed factor, and the collision force are all ramps.

use serde::{Deserialize, Serialize};

/// A scalar that ramps toward a maximum and freezes there.
///
/// Invariant: `0 <= value <= max` for any sequence of updates with
/// non-negative rates and delta times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    current: f32,
    max: f32,
    rate: f32,
}

impl Ramp {
    /// Ramp starting at zero with its own climb rate.
    pub fn new(max: f32, rate: f32) -> Self {
        Self::starting_at(0.0, max, rate)
    }

    /// Ramp that starts part-way up (the collision force does).
    pub fn starting_at(initial: f32, max: f32, rate: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: initial.clamp(0.0, max),
            max,
            rate: rate.max(0.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_maxed(&self) -> bool {
        self.current >= self.max
    }

    /// Climb toward the cap at the ramp's own rate. No-op once maxed.
    pub fn advance(&mut self, dt: f32) {
        let rate = self.rate;
        self.advance_at(rate, dt);
    }

    /// Climb toward the cap at an externally supplied rate (the turn ramp
    /// climbs at the live speed factor, not a fixed rate of its own).
    pub fn advance_at(&mut self, rate: f32, dt: f32) {
        self.current = (self.current + rate.max(0.0) * dt.max(0.0)).clamp(0.0, self.max);
    }

    /// Ramp back down toward zero at the supplied rate.
    pub fn decay_at(&mut self, rate: f32, dt: f32) {
        self.current = (self.current - rate.max(0.0) * dt.max(0.0)).clamp(0.0, self.max);
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
    }
}
