//! Game orchestrator
//!
//! Owns the run, the notification bus, and the services, and routes sim
//! events outward: sounds and camera shake to their services, score and
//! coin changes to the counters, notices to the bus subscribers.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::audio::{AudioManager, AudioOutput, SoundEffect};
use crate::events::{EventBus, GameNotice, SubscriptionId};
use crate::platform::Platform;
use crate::score::{CoinWallet, ScoreBoard};
use crate::settings::Settings;
use crate::sim::{
    self, handle_contact, Contact, OrthoCamera, RunState, SimEvent, StopCause, TickInput,
};
use crate::tuning::Tuning;
use crate::ui::UiManager;

/// Camera feedback effects; rendering itself is external.
pub trait CameraEffects {
    fn shake(&mut self);
}

/// No-op effects for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCameraEffects;

impl CameraEffects for NullCameraEffects {
    fn shake(&mut self) {}
}

/// Raw pointer sample for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub pointer_held: bool,
    pub pointer_down: bool,
    pub pointer_over_select_character: bool,
}

/// The pause between the terminal transition and the game-over notice.
#[derive(Debug, Clone, Copy)]
struct GameOverStaging {
    ticks_remaining: u32,
    cause: StopCause,
}

pub struct Game {
    state: RunState,
    camera: OrthoCamera,
    bus: EventBus,
    audio: AudioManager,
    camera_fx: Box<dyn CameraEffects>,
    score: ScoreBoard,
    coins: CoinWallet,
    ui: Rc<RefCell<UiManager>>,
    ui_subscription: Option<SubscriptionId>,
    tuning: Tuning,
    staging: Option<GameOverStaging>,
    /// Last crash impulse handed to the physics collaborator
    last_impulse: Option<Vec3>,
}

impl Game {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tuning: Tuning,
        settings: &Settings,
        platform: Platform,
        audio_output: Box<dyn AudioOutput>,
        camera_fx: Box<dyn CameraEffects>,
        best: u32,
        coins: u64,
        seed: u64,
    ) -> Self {
        let ui = Rc::new(RefCell::new(UiManager::new(
            platform,
            settings,
            tuning.ui.clone(),
            tuning.reward.clone(),
            best,
            coins,
            seed,
        )));

        let mut bus = EventBus::new();
        let ui_subscription = {
            let ui = ui.clone();
            Some(bus.subscribe(move |notice| ui.borrow_mut().on_notice(notice)))
        };

        Self {
            state: RunState::new(&tuning.player),
            camera: OrthoCamera::new(
                Vec3::ZERO,
                tuning.camera.right_axis,
                tuning.camera.half_extent,
            ),
            bus,
            audio: AudioManager::new(audio_output, settings),
            camera_fx,
            score: ScoreBoard::new(best),
            coins: CoinWallet::new(coins),
            ui,
            ui_subscription,
            tuning,
            staging: None,
            last_impulse: None,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn coins(&self) -> &CoinWallet {
        &self.coins
    }

    pub fn ui(&self) -> Rc<RefCell<UiManager>> {
        self.ui.clone()
    }

    pub fn last_impulse(&self) -> Option<Vec3> {
        self.last_impulse
    }

    /// Register an extra bus listener (HUD overlays, telemetry, the demo).
    pub fn subscribe(&mut self, listener: impl FnMut(&GameNotice) + 'static) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Advance one frame of `dt` seconds.
    pub fn frame(&mut self, input: FrameInput, dt: f32) {
        self.ui
            .borrow_mut()
            .set_pointer_over_select_character(input.pointer_over_select_character);
        let blocked = self.ui.borrow().blocks_run_start();

        let tick_input = TickInput {
            pointer_held: input.pointer_held,
            pointer_down: input.pointer_down,
            pointer_over_blocking_ui: blocked,
        };
        sim::tick(&mut self.state, &tick_input, &self.camera, dt);
        self.camera.follow(self.state.position);

        self.dispatch_sim_events();
        self.advance_game_over_staging();

        self.ui.borrow_mut().update();
        let restart = self.ui.borrow_mut().take_restart_request();
        if restart {
            self.new_run();
        }
    }

    /// Trigger-volume entry reported by the host physics.
    pub fn on_trigger_enter(&mut self, contact: Contact) {
        handle_contact(&mut self.state, contact);
        self.dispatch_sim_events();
    }

    /// Early-warning predicate for external collaborators (obstacle spawner,
    /// camera lead); never ends the run itself.
    pub fn is_heading_off_screen(&self) -> bool {
        sim::is_heading_off_screen(&self.state, &self.camera)
    }

    fn dispatch_sim_events(&mut self) {
        for event in self.state.take_events() {
            match event {
                SimEvent::RunStarted => {
                    self.bus.publish(&GameNotice::RunStarted);
                }
                SimEvent::RunStopped { cause } => {
                    log::info!("run stopped: {cause:?}");
                    self.camera_fx.shake();
                    self.audio.play(SoundEffect::Crash);
                    self.bus.publish(&GameNotice::PreGameOver);
                    self.staging = Some(GameOverStaging {
                        ticks_remaining: self.tuning.game_over_delay_ticks,
                        cause,
                    });
                }
                SimEvent::BodiesReleased => {
                    log::debug!("ragdoll bodies released");
                }
                SimEvent::ImpulseApplied { force } => {
                    log::debug!("crash impulse {force:?}");
                    self.last_impulse = Some(force);
                }
                SimEvent::CollectiblePicked { volume } => {
                    log::debug!("collectible {volume} picked");
                    self.audio.play(SoundEffect::Collect);
                    let score = self.score.add(1);
                    self.bus.publish(&GameNotice::ScoreUpdated(score));
                    let total = self.coins.add(1);
                    self.bus.publish(&GameNotice::CoinsUpdated(total));
                }
            }
        }
    }

    fn advance_game_over_staging(&mut self) {
        if let Some(staging) = self.staging {
            if staging.ticks_remaining > 0 {
                self.staging = Some(GameOverStaging {
                    ticks_remaining: staging.ticks_remaining - 1,
                    cause: staging.cause,
                });
            } else {
                self.staging = None;
                self.bus.publish(&GameNotice::GameOver {
                    cause: staging.cause,
                    new_best: self.score.has_new_best(),
                });
            }
        }
    }

    /// Replace the finished run with a fresh one (scene reload equivalent).
    pub fn new_run(&mut self) {
        log::info!("starting new run");
        self.state = RunState::new(&self.tuning.player);
        self.camera = OrthoCamera::new(
            Vec3::ZERO,
            self.tuning.camera.right_axis,
            self.tuning.camera.half_extent,
        );
        self.score.reset_run();
        self.staging = None;
        self.last_impulse = None;
        self.ui.borrow_mut().display_game_ui();
    }

    // === UI button plumbing ===

    pub fn press_play_button(&mut self) {
        self.audio.play(SoundEffect::Button);
        self.ui.borrow_mut().handle_play_button();
    }

    pub fn press_sound_button(&mut self) -> bool {
        let ui = self.ui.clone();
        ui.borrow_mut().handle_sound_button(&mut self.audio)
    }

    pub fn press_music_button(&mut self) -> bool {
        let ui = self.ui.clone();
        let on = ui.borrow_mut().handle_music_button(&mut self.audio);
        self.bus.publish(&GameNotice::MusicStatusChanged(on));
        on
    }

    pub fn press_select_character_button(&mut self) {
        let ui = self.ui.clone();
        ui.borrow_mut().handle_select_character_button(&mut self.audio);
    }

    pub fn grab_daily_reward(&mut self) {
        let granted = self.ui.borrow_mut().grab_daily_reward();
        if let Some(amount) = granted {
            let total = self.coins.add(u64::from(amount));
            self.bus.publish(&GameNotice::CoinsUpdated(total));
        }
    }

    pub fn share_screenshot(&mut self) {
        let score = self.score.score();
        self.ui.borrow_mut().share_screenshot(score);
    }

    /// Remove every listener before the subsystem goes away.
    pub fn teardown(&mut self) {
        if let Some(id) = self.ui_subscription.take() {
            self.bus.unsubscribe(id);
        }
        self.bus.clear();
    }
}
