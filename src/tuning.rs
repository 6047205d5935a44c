//! Data-driven game balance
//!
//! Every timing constant of the contest lives here so a JSON file can
//! override any subset of them. Missing fields fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opponent scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentRig {
    /// Rendered head width in world units
    pub head_width: f32,
    /// Pupil center relative to the opponent origin
    pub pupil_offset: Vec2,
    /// Pupil collider radius
    pub pupil_radius: f32,
    /// Starting x position
    pub start_x: f32,
}

impl Default for OpponentRig {
    fn default() -> Self {
        Self {
            head_width: 4.0,
            pupil_offset: Vec2::new(0.0, 0.5),
            pupil_radius: 0.4,
            start_x: 0.0,
        }
    }
}

/// Gaze point scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeRig {
    /// Collider radius in world units
    pub radius: f32,
}

impl Default for GazeRig {
    fn default() -> Self {
        Self { radius: 0.1 }
    }
}

/// Objects present in the game scene.
///
/// Either rig may be absent (`null` in JSON); the round refuses to start
/// without both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    pub screen_width_px: f32,
    pub screen_height_px: f32,
    pub opponent: Option<OpponentRig>,
    pub gaze_point: Option<GazeRig>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            screen_width_px: 1280.0,
            screen_height_px: 720.0,
            opponent: Some(OpponentRig::default()),
            gaze_point: Some(GazeRig::default()),
        }
    }
}

/// Game balance values (seconds unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round ===
    /// Sleeping-to-awake intro before the gaze collider turns on
    pub intro_duration: f32,
    /// Delay before the second snore
    pub snore_repeat_delay: f32,
    /// Win threshold with no prior wins
    pub base_win_duration: f32,
    /// Extra seconds per prior win, drawn uniformly from this range
    pub win_increment_min: f32,
    pub win_increment_max: f32,
    /// Delay before the win cue
    pub win_cue_delay: f32,
    /// End-of-round animation before the round reports
    pub round_end_delay: f32,

    // === Opponent ===
    /// Idle gap between opponent actions, drawn uniformly from this range
    pub action_cooldown_min: f32,
    pub action_cooldown_max: f32,
    /// Move interpolation length
    pub move_duration: f32,
    /// Roll/fake animation length
    pub action_duration: f32,
    /// Delay before the fake cue
    pub fake_cue_delay: f32,

    // === Scenes ===
    /// Loader scene dwell before the menu
    pub loader_duration: f32,
    /// Screen fade length, also the delay before a scene switch
    pub transition_duration: f32,

    // === Audio ===
    /// Snore start-to-end gap
    pub snore_end_delay: f32,
    /// Music fade in/out length
    pub music_fade_duration: f32,
    /// Music volume ceiling (0.0 - 1.0)
    pub music_max_volume: f32,

    /// Scene objects for the game scene
    pub layout: SceneLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            intro_duration: 5.0,
            snore_repeat_delay: 2.0,
            base_win_duration: 5.0,
            win_increment_min: 3.0,
            win_increment_max: 5.0,
            win_cue_delay: 1.0,
            round_end_delay: 2.0,

            action_cooldown_min: 3.0,
            action_cooldown_max: 5.0,
            move_duration: 1.0,
            action_duration: 1.0,
            fake_cue_delay: 0.8,

            loader_duration: 3.0,
            transition_duration: 1.0,

            snore_end_delay: 1.0,
            music_fade_duration: 2.0,
            music_max_volume: 0.8,

            layout: SceneLayout::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_win_duration": 7.5 }"#).unwrap();
        assert_eq!(tuning.base_win_duration, 7.5);
        assert_eq!(tuning.move_duration, 1.0);
        assert!(tuning.layout.opponent.is_some());
    }

    #[test]
    fn test_null_rig_is_absent() {
        let tuning = Tuning::from_json(r#"{ "layout": { "opponent": null } }"#).unwrap();
        assert!(tuning.layout.opponent.is_none());
        assert!(tuning.layout.gaze_point.is_some());
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::ContestError::Io(_)));
    }
}
