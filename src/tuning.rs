//! Data-driven game balance
//!
//! Everything a designer tweaks lives here: the run parameters, the demo
//! camera extent, UI sequence timings, and the daily reward. Loaded from
//! JSON with per-field defaults so partial files stay valid.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::RunConfig;

/// Demo/test camera parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// World direction of screen-right
    pub right_axis: Vec3,
    /// Half the visible width along `right_axis`
    pub half_extent: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            right_axis: Vec3::new(1.0, 0.0, -1.0),
            half_extent: 12.0,
        }
    }
}

/// Daily reward balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTuning {
    pub min_reward_value: f32,
    pub max_reward_value: f32,
    pub reward_interval_hours: u64,
    pub reward_interval_minutes: u64,
    pub reward_interval_seconds: u64,
}

impl Default for RewardTuning {
    fn default() -> Self {
        Self {
            min_reward_value: 20.0,
            max_reward_value: 100.0,
            reward_interval_hours: 6,
            reward_interval_minutes: 0,
            reward_interval_seconds: 0,
        }
    }
}

impl RewardTuning {
    pub fn interval_millis(&self) -> u64 {
        (self.reward_interval_hours * 3600
            + self.reward_interval_minutes * 60
            + self.reward_interval_seconds)
            * 1000
    }
}

/// Tick counts for the staged UI sequences, at the 60 Hz sim rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiTiming {
    /// First-load menu fade-in delay
    pub first_menu_delay_ticks: u32,
    /// Game-over menu delay
    pub game_over_menu_delay_ticks: u32,
    /// Delay before a requested restart happens
    pub restart_delay_ticks: u32,
    /// Screenshot settle time before the share image shows
    pub share_image_ticks: u32,
    /// Share image display time before the button appears
    pub share_button_ticks: u32,
}

impl Default for UiTiming {
    fn default() -> Self {
        Self {
            first_menu_delay_ticks: 30,
            game_over_menu_delay_ticks: 60,
            restart_delay_ticks: 12,
            share_image_ticks: 12,
            share_button_ticks: 18,
        }
    }
}

/// Complete balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: RunConfig,
    pub camera: CameraTuning,
    pub reward: RewardTuning,
    pub ui: UiTiming,
    /// Ticks between the terminal transition and the game-over notice
    pub game_over_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: RunConfig::default(),
            camera: CameraTuning::default(),
            reward: RewardTuning::default(),
            ui: UiTiming::default(),
            game_over_delay_ticks: 60,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let tuning = Tuning::default();
        assert!(tuning.player.max_speed > 0.0);
        assert!(tuning.player.initial_collision_force <= tuning.player.max_collision_force);
        assert!(tuning.camera.half_extent > 0.0);
        assert_eq!(tuning.reward.interval_millis(), 6 * 3600 * 1000);
    }

    #[test]
    fn test_partial_json_overrides_one_field() {
        let tuning = Tuning::from_json(r#"{"player": {"max_speed": 9.5}}"#).unwrap();
        assert_eq!(tuning.player.max_speed, 9.5);
        // Untouched fields keep their defaults
        assert_eq!(
            tuning.player.max_collision_force,
            RunConfig::default().max_collision_force
        );
    }
}
