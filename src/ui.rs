//! UI panel state
//!
//! Which panels and buttons are visible, and the timed sequences between
//! them. Widget rendering is external; this is only the state machine the
//! screen reflects. Timed sequences advance one tick per frame.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::events::GameNotice;
use crate::platform::Platform;
use crate::settings::Settings;
use crate::tuning::{RewardTuning, UiTiming};

/// Visibility flags for every panel and button the HUD owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    pub title: bool,
    pub instruction: bool,
    pub score_label: bool,
    pub new_best: bool,
    pub play_button: bool,
    pub select_character: bool,
    pub menu_buttons: bool,
    pub settings_panel: bool,
    pub store_panel: bool,
    pub share_image: bool,
    pub share_button: bool,
    pub watch_video: bool,
    pub free_gifts: bool,
    pub reward_panel: bool,
}

/// Staged sequences, one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiSequence {
    Idle,
    /// Delay before a menu shows
    MenuDelay { ticks_remaining: u32, game_over: bool },
    /// Screenshot settling before the share image shows
    ShareImage { ticks_remaining: u32 },
    /// Share image on screen before the button appears
    ShareButton { ticks_remaining: u32 },
    /// Delay before a requested restart fires
    RestartDelay { ticks_remaining: u32 },
}

/// Daily-reward label state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardStatus {
    Due,
    CountingDown { remaining_millis: u64 },
}

/// UI-state manager. Owns the platform capabilities it talks to.
pub struct UiManager {
    panels: Panels,
    first_load: bool,
    sequence: UiSequence,
    score_display: u32,
    best_display: u32,
    coins_display: u64,
    score_pulse: bool,
    music_on: bool,
    new_best_pending: bool,
    restart_requested: bool,
    pointer_over_select_character: bool,
    next_reward_at_millis: u64,
    rng: Pcg32,
    platform: Platform,
    sharing_enabled: bool,
    share_message: String,
    share_app_url: bool,
    app_url: String,
    timing: UiTiming,
    reward: RewardTuning,
}

impl UiManager {
    pub fn new(
        platform: Platform,
        settings: &Settings,
        timing: UiTiming,
        reward: RewardTuning,
        best: u32,
        coins: u64,
        reward_seed: u64,
    ) -> Self {
        let now = platform.clock.now_millis();
        Self {
            panels: Panels::default(),
            first_load: true,
            sequence: UiSequence::MenuDelay {
                ticks_remaining: timing.first_menu_delay_ticks,
                game_over: false,
            },
            score_display: 0,
            best_display: best,
            coins_display: coins,
            score_pulse: false,
            music_on: settings.music_on,
            new_best_pending: false,
            restart_requested: false,
            pointer_over_select_character: false,
            next_reward_at_millis: now,
            rng: Pcg32::seed_from_u64(reward_seed),
            platform,
            sharing_enabled: settings.enable_sharing,
            share_message: settings.share_message.clone(),
            share_app_url: settings.share_app_url,
            app_url: settings.app_url.clone(),
            timing,
            reward,
        }
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn first_load(&self) -> bool {
        self.first_load
    }

    pub fn displayed_score(&self) -> u32 {
        self.score_display
    }

    pub fn displayed_best(&self) -> u32 {
        self.best_display
    }

    pub fn displayed_coins(&self) -> u64 {
        self.coins_display
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    /// One-frame score pulse for the label animation; cleared on read.
    pub fn take_score_pulse(&mut self) -> bool {
        std::mem::take(&mut self.score_pulse)
    }

    /// Drained by the orchestrator to trigger a new run.
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    pub fn set_pointer_over_select_character(&mut self, over: bool) {
        self.pointer_over_select_character = over;
    }

    /// Whether some blocking UI state should keep a pointer press from
    /// starting the run.
    pub fn blocks_run_start(&self) -> bool {
        self.first_load || self.pointer_over_select_character
    }

    /// Advance staged sequences by one frame tick.
    pub fn update(&mut self) {
        self.sequence = match self.sequence {
            UiSequence::Idle => UiSequence::Idle,

            UiSequence::MenuDelay {
                ticks_remaining,
                game_over,
            } => {
                if ticks_remaining > 1 {
                    UiSequence::MenuDelay {
                        ticks_remaining: ticks_remaining - 1,
                        game_over,
                    }
                } else {
                    self.display_menu(game_over);
                    if game_over && self.sharing_enabled && self.platform.share.screenshot_ready() {
                        UiSequence::ShareImage {
                            ticks_remaining: self.timing.share_image_ticks,
                        }
                    } else {
                        UiSequence::Idle
                    }
                }
            }

            UiSequence::ShareImage { ticks_remaining } => {
                if ticks_remaining > 1 {
                    UiSequence::ShareImage {
                        ticks_remaining: ticks_remaining - 1,
                    }
                } else {
                    self.panels.share_image = true;
                    UiSequence::ShareButton {
                        ticks_remaining: self.timing.share_button_ticks,
                    }
                }
            }

            UiSequence::ShareButton { ticks_remaining } => {
                if ticks_remaining > 1 {
                    UiSequence::ShareButton {
                        ticks_remaining: ticks_remaining - 1,
                    }
                } else {
                    self.panels.share_button = true;
                    UiSequence::Idle
                }
            }

            UiSequence::RestartDelay { ticks_remaining } => {
                if ticks_remaining > 1 {
                    UiSequence::RestartDelay {
                        ticks_remaining: ticks_remaining - 1,
                    }
                } else {
                    self.restart_requested = true;
                    UiSequence::Idle
                }
            }
        };
    }

    /// Bus subscription entry point.
    pub fn on_notice(&mut self, notice: &GameNotice) {
        match notice {
            GameNotice::RunStarted => {
                self.panels.select_character = false;
                self.panels.instruction = false;
            }
            GameNotice::PreGameOver => {
                if self.sharing_enabled {
                    self.platform.share.capture_screenshot();
                }
            }
            GameNotice::GameOver { new_best, .. } => {
                self.new_best_pending = *new_best;
                self.sequence = UiSequence::MenuDelay {
                    ticks_remaining: self.timing.game_over_menu_delay_ticks,
                    game_over: true,
                };
            }
            GameNotice::ScoreUpdated(score) => {
                self.score_display = *score;
                self.best_display = self.best_display.max(*score);
                self.score_pulse = true;
            }
            GameNotice::CoinsUpdated(total) => {
                self.coins_display = *total;
            }
            GameNotice::MusicStatusChanged(on) => {
                self.music_on = *on;
            }
        }
    }

    fn display_menu(&mut self, game_over: bool) {
        self.panels.free_gifts = true;
        self.panels.play_button = true;
        self.panels.menu_buttons = true;
        self.panels.share_button = false;
        self.panels.share_image = false;

        if game_over {
            self.panels.select_character = false;
            self.panels.score_label = true;
            self.panels.new_best = self.new_best_pending;
        } else {
            self.panels.title = true;
        }
    }

    /// Switch the HUD into the pre-run state.
    pub fn display_game_ui(&mut self) {
        self.panels.watch_video = false;
        self.panels.free_gifts = false;
        self.panels.share_button = false;
        self.panels.share_image = false;
        self.panels.play_button = false;
        self.panels.menu_buttons = false;
        self.panels.title = false;
        self.panels.new_best = false;

        self.panels.instruction = true;
        self.panels.score_label = true;
        self.panels.select_character = true;
        self.sequence = UiSequence::Idle;
    }

    pub fn handle_play_button(&mut self) {
        if self.first_load {
            self.display_game_ui();
            self.first_load = false;
        } else {
            self.sequence = UiSequence::RestartDelay {
                ticks_remaining: self.timing.restart_delay_ticks,
            };
        }
    }

    pub fn handle_sound_button(&mut self, audio: &mut AudioManager) -> bool {
        audio.toggle_mute()
    }

    /// Returns the new music state for the caller to publish.
    pub fn handle_music_button(&mut self, audio: &mut AudioManager) -> bool {
        audio.toggle_music()
    }

    /// Scene loading is external; we only quiet the audio and note the intent.
    pub fn handle_select_character_button(&mut self, audio: &mut AudioManager) {
        audio.stop();
        log::info!("character selection requested");
    }

    pub fn show_settings_panel(&mut self) {
        self.panels.settings_panel = true;
    }

    pub fn hide_settings_panel(&mut self) {
        self.panels.settings_panel = false;
    }

    pub fn show_store(&mut self) {
        self.panels.store_panel = true;
    }

    pub fn hide_store(&mut self) {
        self.panels.store_panel = false;
    }

    pub fn show_watch_for_coins_button(&mut self) {
        self.panels.watch_video = true;
    }

    pub fn hide_watch_for_coins_button(&mut self) {
        self.panels.watch_video = false;
    }

    /// Countdown state for the free-gifts button label.
    pub fn reward_status(&self) -> RewardStatus {
        let now = self.platform.clock.now_millis();
        if now >= self.next_reward_at_millis {
            RewardStatus::Due
        } else {
            RewardStatus::CountingDown {
                remaining_millis: self.next_reward_at_millis - now,
            }
        }
    }

    /// Claim the daily reward if it is due. Returns the granted amount,
    /// rounded down to a multiple of 5.
    pub fn grab_daily_reward(&mut self) -> Option<u32> {
        if self.reward_status() != RewardStatus::Due {
            return None;
        }
        let raw: f32 = self
            .rng
            .random_range(self.reward.min_reward_value..=self.reward.max_reward_value);
        let rounded = (raw.round() as u32 / 5) * 5;

        self.panels.reward_panel = true;
        self.next_reward_at_millis =
            self.platform.clock.now_millis() + self.reward.interval_millis();
        log::info!("daily reward granted: {rounded}");
        Some(rounded)
    }

    pub fn hide_reward_panel(&mut self) {
        self.panels.reward_panel = false;
    }

    /// Hand the captured screenshot plus message to the share sheet.
    pub fn share_screenshot(&mut self, score: u32) {
        if !self.platform.share.screenshot_ready() {
            log::warn!("share requested with no captured screenshot");
            return;
        }
        let mut message = self.share_message.replace("[score]", &score.to_string());
        if self.share_app_url {
            message.push_str("\n\n");
            message.push_str(&self.app_url);
        }
        self.platform.share.share(&message);
    }

    pub fn show_leaderboard(&mut self) {
        if self.platform.services.is_initialized() {
            self.platform.services.show_leaderboard();
        } else {
            self.platform.services.init();
        }
    }

    pub fn show_achievements(&mut self) {
        if self.platform.services.is_initialized() {
            self.platform.services.show_achievements();
        } else {
            self.platform.services.init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedClock, NullGameServices, NullShare, Platform};
    use crate::sim::StopCause;

    fn test_platform(now: u64) -> Platform {
        Platform {
            share: Box::new(NullShare::default()),
            services: Box::new(NullGameServices),
            clock: Box::new(FixedClock(now)),
        }
    }

    fn manager() -> UiManager {
        UiManager::new(
            test_platform(0),
            &Settings::default(),
            UiTiming::default(),
            RewardTuning::default(),
            0,
            0,
            42,
        )
    }

    fn run_ticks(ui: &mut UiManager, n: u32) {
        for _ in 0..n {
            ui.update();
        }
    }

    #[test]
    fn test_first_load_menu_appears_after_delay() {
        let mut ui = manager();
        assert!(!ui.panels().title);

        run_ticks(&mut ui, UiTiming::default().first_menu_delay_ticks);
        assert!(ui.panels().title);
        assert!(ui.panels().play_button);
        assert!(ui.panels().free_gifts);
        assert!(!ui.panels().score_label);
    }

    #[test]
    fn test_play_button_leaves_first_load() {
        let mut ui = manager();
        run_ticks(&mut ui, UiTiming::default().first_menu_delay_ticks);

        assert!(ui.blocks_run_start());
        ui.handle_play_button();
        assert!(!ui.first_load());
        assert!(!ui.blocks_run_start());
        assert!(ui.panels().instruction);
        assert!(ui.panels().select_character);
        assert!(!ui.panels().title);
    }

    #[test]
    fn test_run_started_hides_instruction_and_select() {
        let mut ui = manager();
        run_ticks(&mut ui, UiTiming::default().first_menu_delay_ticks);
        ui.handle_play_button();

        ui.on_notice(&GameNotice::RunStarted);
        assert!(!ui.panels().instruction);
        assert!(!ui.panels().select_character);
    }

    #[test]
    fn test_game_over_menu_with_share_staging() {
        let timing = UiTiming::default();
        let mut ui = manager();
        run_ticks(&mut ui, timing.first_menu_delay_ticks);
        ui.handle_play_button();

        ui.on_notice(&GameNotice::PreGameOver);
        ui.on_notice(&GameNotice::GameOver {
            cause: StopCause::Collision,
            new_best: true,
        });

        run_ticks(&mut ui, timing.game_over_menu_delay_ticks);
        assert!(ui.panels().play_button);
        assert!(ui.panels().score_label);
        assert!(ui.panels().new_best);
        assert!(!ui.panels().title);
        assert!(!ui.panels().share_button);

        run_ticks(&mut ui, timing.share_image_ticks);
        assert!(ui.panels().share_image);
        assert!(!ui.panels().share_button);

        run_ticks(&mut ui, timing.share_button_ticks);
        assert!(ui.panels().share_button);
    }

    #[test]
    fn test_restart_request_after_delay() {
        let timing = UiTiming::default();
        let mut ui = manager();
        run_ticks(&mut ui, timing.first_menu_delay_ticks);
        ui.handle_play_button();
        ui.on_notice(&GameNotice::GameOver {
            cause: StopCause::OffScreen,
            new_best: false,
        });
        run_ticks(&mut ui, timing.game_over_menu_delay_ticks);

        ui.handle_play_button();
        assert!(!ui.take_restart_request());
        run_ticks(&mut ui, timing.restart_delay_ticks);
        assert!(ui.take_restart_request());
        // Consumed
        assert!(!ui.take_restart_request());
    }

    #[test]
    fn test_score_notice_updates_labels() {
        let mut ui = manager();
        ui.on_notice(&GameNotice::ScoreUpdated(3));
        assert_eq!(ui.displayed_score(), 3);
        assert_eq!(ui.displayed_best(), 3);
        assert!(ui.take_score_pulse());
        assert!(!ui.take_score_pulse());

        ui.on_notice(&GameNotice::CoinsUpdated(17));
        assert_eq!(ui.displayed_coins(), 17);
    }

    #[test]
    fn test_daily_reward_rolls_multiple_of_five_then_counts_down() {
        let mut ui = manager();
        assert_eq!(ui.reward_status(), RewardStatus::Due);

        let reward = ui.grab_daily_reward().unwrap();
        assert_eq!(reward % 5, 0);
        let tuning = RewardTuning::default();
        assert!(reward as f32 <= tuning.max_reward_value);
        assert!(ui.panels().reward_panel);

        // Clock is fixed, so the next reward is strictly in the future
        assert!(matches!(
            ui.reward_status(),
            RewardStatus::CountingDown { .. }
        ));
        assert_eq!(ui.grab_daily_reward(), None);

        ui.hide_reward_panel();
        assert!(!ui.panels().reward_panel);
    }

    #[test]
    fn test_blocking_control_under_pointer() {
        let mut ui = manager();
        run_ticks(&mut ui, UiTiming::default().first_menu_delay_ticks);
        ui.handle_play_button();
        assert!(!ui.blocks_run_start());

        ui.set_pointer_over_select_character(true);
        assert!(ui.blocks_run_start());
        ui.set_pointer_over_select_character(false);
        assert!(!ui.blocks_run_start());
    }
}
