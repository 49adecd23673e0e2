//! Game settings and preferences
//!
//! Persisted by an external profile store; this module only defines the
//! shape and the JSON round-trip.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// All sound effects off
    pub sound_muted: bool,
    /// Background music playing
    pub music_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Sharing ===
    /// Whether to show the Share button after a run
    pub enable_sharing: bool,
    /// Share message; `[score]` is replaced with the actual score
    pub share_message: String,
    /// Append the store link to the share message
    pub share_app_url: bool,
    /// Store link appended when `share_app_url` is set
    pub app_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_muted: false,
            music_on: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            enable_sharing: true,
            share_message: "Awesome! I've just scored [score] in Drift Dash! #driftdash".into(),
            share_app_url: true,
            app_url: "https://example.com/drift-dash".into(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
