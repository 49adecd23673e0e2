//! Run state and core simulation types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::ImpulseSequence;
use super::ramp::Ramp;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first activate input
    Idle,
    /// Sled is drifting
    Running,
    /// Run ended; terminal
    Stopped,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopCause {
    OffScreen,
    Collision,
}

/// Notifications produced by the sim, drained by the orchestrator each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// First activate input accepted; fired once per run
    RunStarted,
    /// Terminal transition; fired once per run
    RunStopped { cause: StopCause },
    /// Both ragdoll bodies switch from kinematic pass-through to live dynamics
    BodiesReleased,
    /// One-time crash impulse; an equal torque goes along the same direction
    ImpulseApplied { force: Vec3 },
    /// A collectible volume was consumed
    CollectiblePicked { volume: u32 },
}

/// Balance parameters for a run. Loaded from tuning data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Cap for both the drift speed and the turn speed
    pub max_speed: f32,
    /// Cap for the turn acceleration factor
    pub max_speed_factor: f32,
    /// Crash impulse magnitude at run start
    pub initial_collision_force: f32,
    /// Crash impulse cap
    pub max_collision_force: f32,
    /// Climb rate of the drift speed and the speed factor
    pub increase_speed_factor: f32,
    /// Climb rate of the collision force
    pub increase_collision_force_factor: f32,
    /// Unit direction of the crash impulse, from the scene layout
    pub collision_direction: Vec3,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_speed: 7.0,
            max_speed_factor: 3.5,
            initial_collision_force: 300.0,
            max_collision_force: 800.0,
            increase_speed_factor: 0.5,
            increase_collision_force_factor: 10.0,
            collision_direction: Vec3::new(0.0, 1.0, -1.0),
        }
    }
}

/// Per-run movement/collision state. Created at spawn, mutated once per tick,
/// replaced when a new run begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    phase: RunPhase,
    stop_cause: Option<StopCause>,
    /// Sled world position
    pub position: Vec3,
    /// Yaw-only facing in degrees
    pub yaw_degrees: f32,
    /// Input-driven left-turn speed; climbs and decays at the speed factor
    turn_speed: Ramp,
    /// Down-right drift speed; climbs on its own once the run starts
    drift_speed: Ramp,
    /// Turn acceleration factor; climbs on its own once the run starts
    speed_factor: Ramp,
    /// Crash impulse magnitude; climbs on its own once the run starts
    collision_force: Ramp,
    collision_direction: Vec3,
    /// In-flight crash impulse handoff, if any
    pub(super) impulse: Option<ImpulseSequence>,
    /// The sled's own trigger-detection zone
    trigger_zone_enabled: bool,
    /// Body colliders: pass-through until a crash makes them solid
    bodies_solid: bool,
    /// Collectible volumes already consumed this run
    spent_collectibles: Vec<u32>,
    #[serde(skip)]
    pub(super) events: Vec<SimEvent>,
}

impl RunState {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            phase: RunPhase::Idle,
            stop_cause: None,
            position: Vec3::ZERO,
            yaw_degrees: crate::consts::BASE_YAW_DEGREES,
            turn_speed: Ramp::new(config.max_speed, 0.0),
            drift_speed: Ramp::new(config.max_speed, config.increase_speed_factor),
            speed_factor: Ramp::new(config.max_speed_factor, config.increase_speed_factor),
            collision_force: Ramp::starting_at(
                config.initial_collision_force,
                config.max_collision_force,
                config.increase_collision_force_factor,
            ),
            collision_direction: config.collision_direction.normalize_or_zero(),
            impulse: None,
            trigger_zone_enabled: true,
            bodies_solid: false,
            spent_collectibles: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        self.phase != RunPhase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == RunPhase::Stopped
    }

    pub fn stop_cause(&self) -> Option<StopCause> {
        self.stop_cause
    }

    pub fn turn_speed(&self) -> f32 {
        self.turn_speed.value()
    }

    pub fn drift_speed(&self) -> f32 {
        self.drift_speed.value()
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor.value()
    }

    pub fn collision_force(&self) -> f32 {
        self.collision_force.value()
    }

    pub fn max_speed(&self) -> f32 {
        self.turn_speed.max()
    }

    pub fn collision_direction(&self) -> Vec3 {
        self.collision_direction
    }

    pub fn trigger_zone_enabled(&self) -> bool {
        self.trigger_zone_enabled
    }

    pub fn bodies_solid(&self) -> bool {
        self.bodies_solid
    }

    /// Whether the sled is actively turning this tick.
    pub fn is_turning(&self) -> bool {
        self.turn_speed.value() > 0.0
    }

    /// Take the events produced since the last drain.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn begin_run(&mut self) {
        debug_assert_eq!(self.phase, RunPhase::Idle);
        self.phase = RunPhase::Running;
        self.events.push(SimEvent::RunStarted);
    }

    /// Terminal transition; idempotent.
    pub(super) fn stop(&mut self, cause: StopCause) {
        if self.phase == RunPhase::Stopped {
            return;
        }
        self.phase = RunPhase::Stopped;
        self.stop_cause = Some(cause);
        self.events.push(SimEvent::RunStopped { cause });
    }

    pub(super) fn disable_trigger_zone(&mut self) {
        self.trigger_zone_enabled = false;
    }

    pub(super) fn solidify_bodies(&mut self) {
        self.bodies_solid = true;
    }

    pub(super) fn mark_collectible_spent(&mut self, volume: u32) -> bool {
        if self.spent_collectibles.contains(&volume) {
            return false;
        }
        self.spent_collectibles.push(volume);
        true
    }

    pub(super) fn turn_speed_mut(&mut self) -> &mut Ramp {
        &mut self.turn_speed
    }

    pub(super) fn drift_speed_mut(&mut self) -> &mut Ramp {
        &mut self.drift_speed
    }

    pub(super) fn speed_factor_mut(&mut self) -> &mut Ramp {
        &mut self.speed_factor
    }

    pub(super) fn collision_force_mut(&mut self) -> &mut Ramp {
        &mut self.collision_force
    }
}
