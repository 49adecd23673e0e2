//! Audio routing
//!
//! Playback is a platform capability; this keeps the mute/music flags and
//! volume levels and decides what reaches the output.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Sled hit a wall or obstacle, or slid off screen
    Crash,
    /// Collectible picked up
    Collect,
    /// UI button press
    Button,
}

/// Platform playback sink.
pub trait AudioOutput {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Silent sink for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioOutput for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn start_music(&mut self, _volume: f32) {}
    fn stop_music(&mut self) {}
}

/// Audio manager for the game
pub struct AudioManager {
    output: Box<dyn AudioOutput>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_on: bool,
}

impl AudioManager {
    pub fn new(output: Box<dyn AudioOutput>, settings: &Settings) -> Self {
        let mut manager = Self {
            output,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: settings.sound_muted,
            music_on: settings.music_on,
        };
        if manager.music_on && !manager.muted {
            let volume = manager.master_volume * manager.music_volume;
            manager.output.start_music(volume);
        }
        manager
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.output.play(effect, self.master_volume * self.sfx_volume);
    }

    /// Stop any ongoing playback.
    pub fn stop(&mut self) {
        self.output.stop_music();
    }

    /// Returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.output.stop_music();
        } else if self.music_on {
            self.output.start_music(self.master_volume * self.music_volume);
        }
        log::info!("sound {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// Returns the new music-on state.
    pub fn toggle_music(&mut self) -> bool {
        self.music_on = !self.music_on;
        if !self.music_on {
            self.output.stop_music();
        } else if !self.muted {
            self.output.start_music(self.master_volume * self.music_volume);
        }
        self.music_on
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_music_off(&self) -> bool {
        !self.music_on
    }
}
