//! Drift Dash - a diagonal drift-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (drift motion, bounds, collision response)
//! - `events`: Notification bus for run/score/audio notices
//! - `game`: Orchestrator wiring the sim to services and the bus
//! - `ui`: UI panel state machine (widget rendering is external)
//! - `platform`: Share/leaderboard/clock capability abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod events;
pub mod game;
pub mod platform;
pub mod score;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz mobile frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport X band the sled may occupy before the run ends
    pub const VIEWPORT_MIN_X: f32 = -0.15;
    pub const VIEWPORT_MAX_X: f32 = 1.15;

    /// Edge-approach warning thresholds (still on screen, heading out)
    pub const EDGE_WARN_RIGHT: f32 = 0.95;
    pub const EDGE_WARN_LEFT: f32 = 0.05;

    /// Resting yaw of the sled; the turn angle is added on top
    pub const BASE_YAW_DEGREES: f32 = 45.0;
}

/// Angle between two vectors in degrees, in [0, 180].
///
/// Degenerate inputs (either vector near zero) yield 0.
#[inline]
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    let denom = a.length() * b.length();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
