//! Drift Dash entry point
//!
//! Headless demo: drives a scripted run through the real orchestrator and
//! logs the notices as they happen. Rendering, physics, and input polling
//! belong to the host engine and are absent here.

use std::cell::RefCell;
use std::rc::Rc;

use drift_dash::audio::NullAudio;
use drift_dash::consts::{MAX_SUBSTEPS, SIM_DT};
use drift_dash::events::GameNotice;
use drift_dash::game::{FrameInput, Game, NullCameraEffects};
use drift_dash::platform::Platform;
use drift_dash::sim::{Contact, ContactKind};
use drift_dash::{Settings, Tuning};

fn main() {
    env_logger::init();
    log::info!("Drift Dash (native) starting...");

    let settings = Settings::default();
    let mut game = Game::new(
        Tuning::default(),
        &settings,
        Platform::headless(),
        Box::new(NullAudio),
        Box::new(NullCameraEffects),
        0,
        0,
        0xD1F7,
    );

    let finished = Rc::new(RefCell::new(false));
    {
        let finished = finished.clone();
        game.subscribe(move |notice| {
            log::info!("notice: {notice:?}");
            if matches!(notice, GameNotice::GameOver { .. }) {
                *finished.borrow_mut() = true;
            }
        });
    }

    // Sit through the first-load menu, then press Play
    for _ in 0..60 {
        game.frame(FrameInput::default(), SIM_DT);
    }
    game.press_play_button();

    let mut accumulator = 0.0_f32;
    let frame_dt = SIM_DT; // headless: one render frame per sim step
    let mut frame: u64 = 0;

    while !*finished.borrow() && frame < 36_000 {
        // Tap on frame 10, then weave: hold and release in 1.5 s bands
        let pointer_down = frame == 10;
        let pointer_held = frame >= 10 && (frame / 90) % 2 == 0;

        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = FrameInput {
                pointer_held,
                pointer_down: pointer_down && substeps == 0,
                ..Default::default()
            };
            game.frame(input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        // A collectible crosses the path mid-run
        if frame == 400 {
            game.on_trigger_enter(Contact {
                kind: ContactKind::Collectible,
                volume: 1,
            });
        }

        if game.is_heading_off_screen() && frame % 60 == 0 {
            log::info!("edge warning at frame {frame}");
        }
        frame += 1;
    }

    log::info!(
        "demo finished after {} frames: score {}, coins {}, cause {:?}",
        frame,
        game.score().score(),
        game.coins().total(),
        game.state().stop_cause()
    );
    game.teardown();
}
