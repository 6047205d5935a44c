//! Staring Contest entry point
//!
//! Headless autoplay: drives the app at a fixed step with a scripted mouse
//! that holds the opponent's gaze for a few rounds, then looks away.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use env_logger::Env;
use glam::Vec2;

use staring_contest::audio::LogSink;
use staring_contest::consts::FRAME_DT;
use staring_contest::scene::SceneName;
use staring_contest::sim::RoundPhase;
use staring_contest::ui::{MenuButton, SummaryButton};
use staring_contest::{App, InputMode, Settings, Tuning};

/// Rounds to play before quitting
const ROUNDS: u32 = 3;
/// Simulated seconds before giving up
const TIME_LIMIT: f32 = 600.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).with_context(|| format!("loading tuning from {}", path))?,
        None => Tuning::default(),
    };
    let settings = Settings {
        input_mode: InputMode::Mouse,
        ..Settings::default()
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut app = App::new(tuning, settings, Box::new(LogSink::default()), seed);
    let viewport = app.services().viewport();
    let mut rounds = 0;
    let mut last_scene = app.scene();

    while !app.should_quit() && app.now() < TIME_LIMIT {
        let frame = app.tick(FRAME_DT);
        let entered = frame.scene != last_scene;
        last_scene = frame.scene;

        match frame.scene {
            SceneName::Menu if entered => {
                if rounds >= ROUNDS {
                    app.press_menu(MenuButton::Quit);
                } else {
                    app.press_menu(MenuButton::Play);
                }
            }
            SceneName::Game => {
                let Some(pupil) = frame.pupil_center else {
                    continue;
                };
                let elapsed = app.round().map(|r| r.outcome().elapsed).unwrap_or(0.0);
                // Last round: blink after a few seconds
                let look_away = rounds + 1 == ROUNDS
                    && frame.phase == Some(RoundPhase::Started)
                    && elapsed > 4.0;
                let target = if look_away { pupil + Vec2::new(0.0, -3.0) } else { pupil };
                app.cursor_mut().set_cursor(viewport.world_to_screen(target));
            }
            SceneName::Summary if entered => {
                rounds += 1;
                for line in frame.summary_text.unwrap_or_default().lines() {
                    log::info!("{}", line);
                }
                if rounds >= ROUNDS {
                    app.press_summary(SummaryButton::MainMenu);
                } else {
                    app.press_summary(SummaryButton::Continue);
                }
            }
            _ => {}
        }
    }

    log::info!("Played {} rounds in {:.1}s", rounds, app.now());
    Ok(())
}
