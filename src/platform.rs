//! Platform capability layer
//!
//! Sharing, game services, and wall-clock access differ per platform. Each
//! is a capability trait picked at startup from configuration; nothing here
//! branches at compile time.

/// Screenshot capture and share-sheet access.
pub trait ShareCapability {
    /// Kick off a full-screen capture; completion is polled.
    fn capture_screenshot(&mut self);
    /// Whether a captured image is ready to present.
    fn screenshot_ready(&self) -> bool;
    /// Hand the captured image plus message to the native share sheet.
    fn share(&mut self, message: &str);
}

/// Leaderboard/achievement service access.
pub trait GameServiceCapability {
    fn is_initialized(&self) -> bool;
    fn init(&mut self);
    fn show_leaderboard(&mut self);
    fn show_achievements(&mut self);
}

/// Wall-clock access for the daily-reward timer.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Share capability that only logs; used headless.
#[derive(Debug, Default)]
pub struct NullShare {
    captured: bool,
}

impl ShareCapability for NullShare {
    fn capture_screenshot(&mut self) {
        self.captured = true;
    }

    fn screenshot_ready(&self) -> bool {
        self.captured
    }

    fn share(&mut self, message: &str) {
        log::info!("share requested: {message}");
    }
}

/// Game services stub for platforms without a signed-in player.
#[derive(Debug, Default)]
pub struct NullGameServices;

impl GameServiceCapability for NullGameServices {
    fn is_initialized(&self) -> bool {
        false
    }

    fn init(&mut self) {
        log::warn!("game services unavailable on this platform");
    }

    fn show_leaderboard(&mut self) {}

    fn show_achievements(&mut self) {}
}

/// System wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Fixed clock for tests and deterministic demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// Which platform backends to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PlatformKind {
    #[default]
    Headless,
}

/// Capability bundle handed to the subsystems that need it.
pub struct Platform {
    pub share: Box<dyn ShareCapability>,
    pub services: Box<dyn GameServiceCapability>,
    pub clock: Box<dyn Clock>,
}

impl Platform {
    pub fn from_kind(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::Headless => Self::headless(),
        }
    }

    pub fn headless() -> Self {
        Self {
            share: Box::new(NullShare::default()),
            services: Box::new(NullGameServices),
            clock: Box::new(SystemClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_share_tracks_capture() {
        let mut share = NullShare::default();
        assert!(!share.screenshot_ready());
        share.capture_screenshot();
        assert!(share.screenshot_ready());
    }

    #[test]
    fn test_fixed_clock_is_constant() {
        let clock = FixedClock(1234);
        assert_eq!(clock.now_millis(), 1234);
        assert_eq!(clock.now_millis(), 1234);
    }

    #[test]
    fn test_headless_bundle_has_no_game_services() {
        let platform = Platform::from_kind(PlatformKind::Headless);
        assert!(!platform.services.is_initialized());
    }
}
