//! Deterministic simulation module
//!
//! All run logic lives here. This module must be pure and deterministic:
//! - Explicit delta time only
//! - No rendering, platform, or service dependencies
//! - Side effects leave as `SimEvent` values, drained by the caller

pub mod bounds;
pub mod collision;
pub mod motion;
pub mod ramp;
pub mod state;
pub mod tick;

pub use bounds::{is_off_screen, OrthoCamera, ViewportProjector};
pub use collision::{handle_contact, Contact, ContactKind, ImpulsePhase, ImpulseSequence};
pub use motion::{facing_yaw_degrees, MotionVector};
pub use ramp::Ramp;
pub use state::{RunConfig, RunPhase, RunState, SimEvent, StopCause};
pub use tick::{is_heading_off_screen, tick, TickInput};
