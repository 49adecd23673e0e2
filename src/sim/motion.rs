//! Screen-relative drift motion
//!
//! The sled drifts diagonally down-right on its own; holding the pointer
//! feeds a left-turn speed that counters the drift and swings the facing.

use glam::Vec3;

use crate::angle_between_degrees;
use crate::consts::BASE_YAW_DEGREES;

/// World axes, +X right and +Z forward, +Y up.
pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const BACK: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Per-tick decomposition of the drift motion. Derived each tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionVector {
    /// Down-right drift, scaled by the drift speed
    pub right: Vec3,
    /// Down-left pull while turning, scaled by the turn speed
    pub left: Vec3,
    /// Counter of `right`; cancels the rightward drift while turning
    pub up_counter: Vec3,
    /// Blended movement direction for this tick
    pub total: Vec3,
}

impl MotionVector {
    pub fn compute(drift_speed: f32, turn_speed: f32) -> Self {
        let right = (BACK + RIGHT) * drift_speed;
        let left = (BACK + LEFT) * turn_speed;
        let up_counter = (FORWARD + LEFT) * turn_speed;
        Self {
            right,
            left,
            up_counter,
            total: right + left + up_counter,
        }
    }

    /// Turn angle between the pure drift vector and the blended direction,
    /// pinned to the exact endpoints at the turn-speed extremes.
    pub fn turn_angle_degrees(&self, turn_speed: f32, max_speed: f32) -> f32 {
        if turn_speed >= max_speed {
            90.0
        } else if turn_speed <= 0.0 {
            0.0
        } else {
            angle_between_degrees(self.right, self.total)
        }
    }
}

/// Yaw-only facing for a given turn angle.
#[inline]
pub fn facing_yaw_degrees(turn_angle: f32) -> f32 {
    BASE_YAW_DEGREES + turn_angle
}
