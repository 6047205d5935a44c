//! Player preferences
//!
//! Held in memory for the session; hosts that want to keep them can
//! round-trip through JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which device drives the gaze point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Mouse cursor stands in for the gaze point
    Mouse,
    /// Eye tracker gaze point
    #[default]
    Eye,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Mouse => "Mouse",
            InputMode::Eye => "Eye",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mouse" | "cursor" => Some(InputMode::Mouse),
            "eye" | "gaze" => Some(InputMode::Eye),
            _ => None,
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            InputMode::Mouse => InputMode::Eye,
            InputMode::Eye => InputMode::Mouse,
        }
    }

    /// Menu button label
    pub fn label(&self) -> String {
        format!("Controls: {}", self.as_str())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gaze point source
    pub input_mode: InputMode,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Eye,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Whether the mouse drives the gaze point
    pub fn mouse_mode(&self) -> bool {
        self.input_mode == InputMode::Mouse
    }

    /// Effective sound effect gain
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain (multiplied with the fade level)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mode_parse() {
        assert_eq!(InputMode::from_str("MOUSE"), Some(InputMode::Mouse));
        assert_eq!(InputMode::from_str("gaze"), Some(InputMode::Eye));
        assert_eq!(InputMode::from_str("joystick"), None);
    }

    #[test]
    fn test_toggle_label() {
        let mode = InputMode::Eye;
        assert_eq!(mode.label(), "Controls: Eye");
        assert_eq!(mode.toggled().label(), "Controls: Mouse");
    }

    #[test]
    fn test_muted_silences() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_json_keeps_mode() {
        let settings = Settings {
            input_mode: InputMode::Mouse,
            master_volume: 0.5,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back, settings);
        assert!(back.mouse_mode());
    }
}
