//! Composition root
//!
//! Owns the session services and the active scene, routes input to the
//! round and swaps scenes when the director says so.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::consts::MAX_FRAME_DT;
use crate::input::{CursorInput, EyeTrackerInput, InputSource};
use crate::scene::SceneName;
use crate::services::Services;
use crate::settings::{InputMode, Settings};
use crate::sim::{ChannelState, Round, RoundPhase};
use crate::tuning::Tuning;
use crate::ui::{LoaderScreen, MainMenu, MenuButton, SummaryButton, SummaryScreen};

/// Scene currently receiving ticks and input
pub enum ActiveScene {
    Loader(LoaderScreen),
    Menu(MainMenu),
    /// `None` when the scene layout could not produce a round
    Game(Option<Round>),
    Summary(SummaryScreen),
}

impl ActiveScene {
    pub fn name(&self) -> SceneName {
        match self {
            ActiveScene::Loader(_) => SceneName::Loader,
            ActiveScene::Menu(_) => SceneName::Menu,
            ActiveScene::Game(_) => SceneName::Game,
            ActiveScene::Summary(_) => SceneName::Summary,
        }
    }
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub scene: SceneName,
    pub phase: Option<RoundPhase>,
    pub channels: Option<ChannelState>,
    pub opponent_position: Option<Vec2>,
    pub pupil_center: Option<Vec2>,
    pub gaze_point: Option<Vec2>,
    /// Screen cover opacity, 1.0 is black
    pub fade_level: f32,
    pub music_volume: f32,
    pub summary_text: Option<String>,
}

pub struct App {
    services: Services,
    scene: ActiveScene,
    now: f32,
    cursor: CursorInput,
    eye: EyeTrackerInput,
    quit: bool,
}

impl App {
    pub fn new(tuning: Tuning, settings: Settings, sink: Box<dyn AudioSink>, seed: u64) -> Self {
        log::info!("Staring contest starting (seed {})", seed);
        let mut services = Services::new(tuning, settings, sink, seed);
        let mut loader = LoaderScreen::new(services.tuning.loader_duration);
        loader.enter(&mut services);
        Self {
            services,
            scene: ActiveScene::Loader(loader),
            now: 0.0,
            cursor: CursorInput::new(),
            eye: EyeTrackerInput::new(),
            quit: false,
        }
    }

    /// Advance one frame. `dt` is clamped so a stalled host cannot skip
    /// through a whole round.
    pub fn tick(&mut self, dt: f32) -> Frame {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.now += dt;

        if let Some(next) = self.services.update(self.now) {
            self.load(next);
        }

        match &mut self.scene {
            ActiveScene::Loader(loader) => loader.tick(dt, &mut self.services),
            ActiveScene::Game(Some(round)) => {
                let viewport = self.services.viewport();
                let sample = match self.services.settings.input_mode {
                    InputMode::Mouse => self.cursor.sample(&viewport),
                    InputMode::Eye => self.eye.sample(&viewport),
                };
                round.tick(dt, &sample, &mut self.services);
            }
            ActiveScene::Game(None) | ActiveScene::Menu(_) | ActiveScene::Summary(_) => {}
        }

        self.frame()
    }

    fn load(&mut self, name: SceneName) {
        self.services.audio.apply_settings(&self.services.settings);
        self.scene = match name {
            SceneName::Loader => {
                let mut loader = LoaderScreen::new(self.services.tuning.loader_duration);
                loader.enter(&mut self.services);
                ActiveScene::Loader(loader)
            }
            SceneName::Menu => {
                let mut menu = MainMenu::new();
                menu.enter(&mut self.services);
                ActiveScene::Menu(menu)
            }
            SceneName::Game => match Round::new(&self.services.tuning) {
                Ok(mut round) => {
                    round.enter(&mut self.services);
                    ActiveScene::Game(Some(round))
                }
                Err(e) => {
                    log::error!("Cannot start round: {}", e);
                    ActiveScene::Game(None)
                }
            },
            SceneName::Summary => {
                let mut summary = SummaryScreen::new();
                summary.enter(&mut self.services);
                ActiveScene::Summary(summary)
            }
        };
    }

    /// Menu button press; ignored outside the menu
    pub fn press_menu(&mut self, button: MenuButton) {
        match &mut self.scene {
            ActiveScene::Menu(menu) => {
                if menu.press(button, &mut self.services).is_break() {
                    self.quit = true;
                }
            }
            other => log::debug!("{:?} ignored in {}", button, other.name().as_str()),
        }
    }

    /// Summary button press; ignored outside the summary
    pub fn press_summary(&mut self, button: SummaryButton) {
        match &mut self.scene {
            ActiveScene::Summary(summary) => summary.press(button, &mut self.services),
            other => log::debug!("{:?} ignored in {}", button, other.name().as_str()),
        }
    }

    pub fn frame(&self) -> Frame {
        let round = self.round();
        Frame {
            scene: self.scene.name(),
            phase: round.map(|r| r.phase()),
            channels: round.map(|r| r.opponent().channels()),
            opponent_position: round.map(|r| r.opponent().position()),
            pupil_center: round.map(|r| r.opponent().pupil_center()),
            gaze_point: round.and_then(|r| r.collider().position()),
            fade_level: self.services.director.fade_level(),
            music_volume: self.services.audio.music_volume(),
            summary_text: match &self.scene {
                ActiveScene::Summary(summary) => Some(summary.text().to_string()),
                _ => None,
            },
        }
    }

    pub fn scene(&self) -> SceneName {
        self.scene.name()
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.scene {
            ActiveScene::Game(round) => round.as_ref(),
            _ => None,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Mouse feed, used in mouse mode
    pub fn cursor_mut(&mut self) -> &mut CursorInput {
        &mut self.cursor
    }

    /// Eye tracker feed, used in eye mode
    pub fn eye_mut(&mut self) -> &mut EyeTrackerInput {
        &mut self.eye
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
