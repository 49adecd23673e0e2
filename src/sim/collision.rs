//! Collision response
//!
//! Contacts arrive from the host's trigger volumes already classified by tag.
//! A crash hands the sled over to ragdoll physics in two staged steps; a
//! collectible is consumed at most once per volume.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{RunState, SimEvent, StopCause};

/// Tag carried by a trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Wall,
    Obstacle,
    Collectible,
}

/// A single trigger-volume overlap reported by the host for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub kind: ContactKind,
    /// Host identifier of the volume, used to consume collectibles once
    pub volume: u32,
}

/// Named phases of the two-step crash impulse handoff.
///
/// The impulse must not land in the same step the bodies stop being
/// pass-through, or the engine's static resolution swallows it; one step
/// separates the release from the force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpulsePhase {
    /// Waiting before releasing body dynamics
    Armed { steps_remaining: u8 },
    /// Bodies released; waiting before the force and torque land
    Released { steps_remaining: u8 },
    /// Impulse applied; sequence finished
    Done,
}

/// Tick-driven crash impulse sequence. One phase step per simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseSequence {
    phase: ImpulsePhase,
    direction: Vec3,
}

impl ImpulseSequence {
    pub fn new(direction: Vec3) -> Self {
        Self {
            phase: ImpulsePhase::Armed { steps_remaining: 1 },
            direction,
        }
    }

    pub fn phase(&self) -> ImpulsePhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == ImpulsePhase::Done
    }

    /// Advance one simulation step. `force` is sampled at the moment the
    /// impulse lands, not when the sequence was armed.
    pub fn step(&mut self, force: f32, events: &mut Vec<SimEvent>) {
        match &mut self.phase {
            ImpulsePhase::Armed { steps_remaining } => {
                *steps_remaining -= 1;
                if *steps_remaining == 0 {
                    events.push(SimEvent::BodiesReleased);
                    self.phase = ImpulsePhase::Released { steps_remaining: 1 };
                }
            }
            ImpulsePhase::Released { steps_remaining } => {
                *steps_remaining -= 1;
                if *steps_remaining == 0 {
                    events.push(SimEvent::ImpulseApplied {
                        force: self.direction * force,
                    });
                    self.phase = ImpulsePhase::Done;
                }
            }
            ImpulsePhase::Done => {}
        }
    }
}

/// Trigger-volume entry callback. No-op unless the run is live.
pub fn handle_contact(state: &mut RunState, contact: Contact) {
    if !state.is_running() || !state.trigger_zone_enabled() {
        return;
    }

    match contact.kind {
        ContactKind::Wall | ContactKind::Obstacle => {
            log::debug!("hit {:?} volume {}", contact.kind, contact.volume);
            state.disable_trigger_zone();
            state.solidify_bodies();
            state.stop(StopCause::Collision);
            state.impulse = Some(ImpulseSequence::new(state.collision_direction()));
        }
        ContactKind::Collectible => {
            if state.mark_collectible_spent(contact.volume) {
                state.events.push(SimEvent::CollectiblePicked {
                    volume: contact.volume,
                });
            }
        }
    }
}
