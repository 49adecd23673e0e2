//! Game notification bus
//!
//! Synchronous observer dispatch on the main thread, in registration order.
//! Subscribers keep the returned id and unsubscribe before teardown so no
//! stale callback outlives its owner.

use crate::sim::StopCause;

/// Notices published by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum GameNotice {
    /// The player started a run
    RunStarted,
    /// Terminal transition just happened; the game-over screen is pending
    PreGameOver,
    /// Game-over staging finished
    GameOver { cause: StopCause, new_best: bool },
    /// Per-run score changed
    ScoreUpdated(u32),
    /// Total currency changed
    CoinsUpdated(u64),
    /// Music was toggled on or off
    MusicStatusChanged(bool),
}

/// Handle for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameNotice)>;

/// Single-threaded publish/subscribe hub.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameNotice) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Dispatch to every listener, oldest subscription first.
    pub fn publish(&mut self, notice: &GameNotice) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(notice);
        }
    }

    /// Drop all listeners (subsystem teardown).
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
