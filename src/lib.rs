//! Staring Contest - an eye-tracking staring minigame
//!
//! Core modules:
//! - `sim`: Round logic (opponent behaviour, gaze engagement, outcome arbitration)
//! - `app`: Composition root owning the services and the active scene
//! - `scene`: Scene names, delayed switches and the screen fade
//! - `audio`: Sound cues and the music fade
//! - `input`: Cursor and eye-tracker gaze sources
//! - `tuning`: Data-driven timings and scene layout

pub mod app;
pub mod audio;
pub mod error;
pub mod input;
pub mod scene;
pub mod score;
pub mod services;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::{App, Frame};
pub use error::{ContestError, Result};
pub use score::ScoreLedger;
pub use settings::{InputMode, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Pixels per world unit for the orthographic camera
    pub const PIXELS_TO_UNITS: f32 = 100.0;

    /// Nominal frame step for headless runs
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest step a single tick may take
    pub const MAX_FRAME_DT: f32 = 0.1;
}
