//! Simulation tick
//!
//! Advances one run deterministically. The ramps, the motion update, and the
//! crash-impulse sequence are independent per-tick tasks; none of them may
//! assume the others ran first within the same tick.

use super::bounds::{self, ViewportProjector};
use super::motion::{facing_yaw_degrees, MotionVector};
use super::state::{RunState, StopCause};

/// Input sample for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer held down this frame (turn input)
    pub pointer_held: bool,
    /// Pointer pressed this frame (edge event)
    pub pointer_down: bool,
    /// A blocking UI control is under the pointer
    pub pointer_over_blocking_ui: bool,
}

/// Advance the run by one step of `dt` seconds.
pub fn tick(state: &mut RunState, input: &TickInput, projector: &dyn ViewportProjector, dt: f32) {
    // Idle -> Running on the first accepted activate input
    if !state.has_started() && input.pointer_down && !input.pointer_over_blocking_ui {
        state.begin_run();
        log::info!("run started");
    }

    if state.is_running() {
        // Self-ramping tasks; each freezes on its own once maxed
        state.drift_speed_mut().advance(dt);
        state.speed_factor_mut().advance(dt);
        state.collision_force_mut().advance(dt);

        // Turn speed follows the pointer at the live factor rate
        let factor = state.speed_factor();
        if input.pointer_held {
            state.turn_speed_mut().advance_at(factor, dt);
        } else {
            state.turn_speed_mut().decay_at(factor, dt);
        }
    }

    if !state.is_stopped() {
        let motion = MotionVector::compute(state.drift_speed(), state.turn_speed());
        state.position += motion.total * dt;
        let angle = motion.turn_angle_degrees(state.turn_speed(), state.max_speed());
        state.yaw_degrees = facing_yaw_degrees(angle);
    }

    if state.is_running() {
        let x = projector.viewport_x(state.position);
        if bounds::is_off_screen(x) {
            log::info!("left the viewport at x = {x:.2}");
            state.stop(StopCause::OffScreen);
        }
    }

    // The crash handoff keeps stepping after the terminal transition
    if let Some(mut seq) = state.impulse.take() {
        let force = state.collision_force();
        seq.step(force, &mut state.events);
        if !seq.is_done() {
            state.impulse = Some(seq);
        }
    }
}

/// Early-warning predicate consumed by external collaborators; never stops
/// the run itself.
pub fn is_heading_off_screen(state: &RunState, projector: &dyn ViewportProjector) -> bool {
    let x = projector.viewport_x(state.position);
    bounds::is_heading_off_screen(x, state.is_turning())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::bounds::OrthoCamera;
    use crate::sim::collision::{handle_contact, Contact, ContactKind};
    use crate::sim::state::{RunConfig, RunPhase, SimEvent};
    use glam::Vec3;

    fn camera() -> OrthoCamera {
        OrthoCamera::new(Vec3::ZERO, Vec3::X, 5.0)
    }

    fn started(config: &RunConfig) -> RunState {
        let mut state = RunState::new(config);
        let input = TickInput {
            pointer_down: true,
            pointer_held: true,
            ..Default::default()
        };
        tick(&mut state, &input, &camera(), SIM_DT);
        state
    }

    #[test]
    fn test_idle_to_running_emits_once() {
        let config = RunConfig::default();
        let mut state = started(&config);
        let events = state.take_events();
        assert_eq!(
            events.iter().filter(|e| **e == SimEvent::RunStarted).count(),
            1
        );
        assert_eq!(state.phase(), RunPhase::Running);

        // A second pointer-down changes nothing
        let input = TickInput {
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &input, &camera(), SIM_DT);
        assert!(!state.take_events().contains(&SimEvent::RunStarted));
    }

    #[test]
    fn test_blocking_ui_suppresses_start() {
        let mut state = RunState::new(&RunConfig::default());
        let input = TickInput {
            pointer_down: true,
            pointer_held: true,
            pointer_over_blocking_ui: true,
        };
        tick(&mut state, &input, &camera(), SIM_DT);
        assert_eq!(state.phase(), RunPhase::Idle);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_speeds_ramp_with_and_without_input() {
        let config = RunConfig::default();
        let mut state = started(&config);
        let held = TickInput {
            pointer_held: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &held, &camera(), SIM_DT);
        }
        let turn_after_hold = state.turn_speed();
        assert!(turn_after_hold > 0.0);
        assert!(state.drift_speed() > 0.0);
        assert!(state.speed_factor() > 0.0);

        // Release: turn speed decays, drift keeps ramping
        let drift_before = state.drift_speed();
        let released = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &released, &camera(), SIM_DT);
        }
        assert!(state.turn_speed() < turn_after_hold);
        assert!(state.drift_speed() >= drift_before);
    }

    #[test]
    fn test_motion_displaces_along_total_vector() {
        let config = RunConfig::default();
        let mut state = started(&config);
        let held = TickInput {
            pointer_held: true,
            ..Default::default()
        };
        let before = state.position;
        tick(&mut state, &held, &camera(), SIM_DT);
        let after = state.position;
        // Drifting down-screen: -Z always moves once drift speed is nonzero
        assert!(after.z < before.z);
    }

    #[test]
    fn test_facing_pinned_at_extremes() {
        let config = RunConfig::default();
        // Camera wide enough that the run never ends off-screen
        let wide = OrthoCamera::new(Vec3::ZERO, Vec3::X, 1.0e6);
        let mut state = started(&config);
        let held = TickInput {
            pointer_held: true,
            ..Default::default()
        };
        // Hold long enough for the turn ramp to max out
        for _ in 0..20_000 {
            tick(&mut state, &held, &wide, SIM_DT);
        }
        assert_eq!(state.turn_speed(), state.max_speed());
        assert_eq!(state.yaw_degrees, 45.0 + 90.0);

        // Fresh run, never turning: exactly the resting yaw
        let mut state = RunState::new(&config);
        let input = TickInput {
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &input, &camera(), SIM_DT);
        assert_eq!(state.yaw_degrees, 45.0);
    }

    #[test]
    fn test_off_screen_right_edge_stops_run() {
        let config = RunConfig::default();
        let mut state = started(&config);
        // Viewport x = 1.2 -> out; the band is 10 wide centered at 0
        state.position = Vec3::new(7.0, 0.0, 0.0);
        tick(&mut state, &TickInput::default(), &camera(), SIM_DT);
        assert!(state.is_stopped());
        assert_eq!(state.stop_cause(), Some(StopCause::OffScreen));
    }

    #[test]
    fn test_near_edge_does_not_stop_run() {
        let config = RunConfig::default();
        let mut state = started(&config);
        // Viewport x = 1.1 -> still inside the band
        state.position = Vec3::new(6.0, 0.0, 0.0);
        tick(&mut state, &TickInput::default(), &camera(), SIM_DT);
        assert!(!state.is_stopped());
    }

    #[test]
    fn test_stopped_run_is_frozen() {
        let config = RunConfig::default();
        let mut state = started(&config);
        state.position = Vec3::new(-7.0, 0.0, 0.0);
        tick(&mut state, &TickInput::default(), &camera(), SIM_DT);
        assert!(state.is_stopped());
        state.take_events();

        let position = state.position;
        let turn = state.turn_speed();
        let drift = state.drift_speed();
        let force = state.collision_force();
        let held = TickInput {
            pointer_held: true,
            pointer_down: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &held, &camera(), SIM_DT);
        }
        assert_eq!(state.position, position);
        assert_eq!(state.turn_speed(), turn);
        assert_eq!(state.drift_speed(), drift);
        assert_eq!(state.collision_force(), force);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_impulse_lands_two_steps_after_contact() {
        let config = RunConfig::default();
        let mut state = started(&config);
        state.take_events();

        handle_contact(
            &mut state,
            Contact {
                kind: ContactKind::Obstacle,
                volume: 1,
            },
        );
        let force_at_contact = state.collision_force();
        state.take_events();

        // Step one: bodies released, no force yet
        tick(&mut state, &TickInput::default(), &camera(), SIM_DT);
        assert_eq!(state.take_events(), vec![SimEvent::BodiesReleased]);

        // Step two: the impulse, scaled by the force at application time.
        // Ramps froze at the terminal transition, so that equals the value
        // at contact.
        tick(&mut state, &TickInput::default(), &camera(), SIM_DT);
        let expected = state.collision_direction() * force_at_contact;
        assert_eq!(
            state.take_events(),
            vec![SimEvent::ImpulseApplied { force: expected }]
        );

        // Nothing further
        tick(&mut state, &TickInput::default(), &camera(), SIM_DT);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_heading_off_screen_predicate() {
        let config = RunConfig::default();
        let mut state = started(&config);
        // x = 0.96 and not turning: warn
        state.position = Vec3::new(4.6, 0.0, 0.0);
        let released = TickInput::default();
        let cam = camera();
        for _ in 0..2000 {
            tick(&mut state, &released, &cam, SIM_DT);
            if !state.is_turning() {
                break;
            }
        }
        assert!(is_heading_off_screen(&state, &cam));
        assert!(!state.is_stopped());
    }
}
