//! Gaze point input
//!
//! Turns raw cursor pixels or eye-tracker viewport samples into world-space
//! gaze samples. The round never learns which device produced them.

use glam::Vec2;

use crate::consts::PIXELS_TO_UNITS;
use crate::tuning::SceneLayout;

/// Screen dimensions and the orthographic camera centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn from_layout(layout: &SceneLayout) -> Self {
        Self::new(layout.screen_width_px, layout.screen_height_px)
    }

    /// Camera orthographic size: half the window height in world units
    pub fn ortho_size(&self) -> f32 {
        self.height_px / PIXELS_TO_UNITS / 2.0
    }

    /// Half the window width in world units
    pub fn half_width(&self) -> f32 {
        self.width_px / PIXELS_TO_UNITS / 2.0
    }

    /// Normalized viewport (0..1, origin bottom-left) to world
    pub fn viewport_to_world(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            (v.x - 0.5) * 2.0 * self.half_width(),
            (v.y - 0.5) * 2.0 * self.ortho_size(),
        )
    }

    /// Screen pixels (origin bottom-left) to world
    pub fn screen_to_world(&self, px: Vec2) -> Vec2 {
        (px - Vec2::new(self.width_px, self.height_px) * 0.5) / PIXELS_TO_UNITS
    }

    /// World to screen pixels
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * PIXELS_TO_UNITS + Vec2::new(self.width_px, self.height_px) * 0.5
    }
}

/// One frame of gaze input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GazeSample {
    /// World position of the gaze point, if the reading was usable
    pub position: Option<Vec2>,
    /// Whether the player is in front of the device
    pub present: bool,
}

impl GazeSample {
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            present: true,
        }
    }

    /// Player left the tracker
    pub fn absent() -> Self {
        Self {
            position: None,
            present: false,
        }
    }
}

/// Anything that can produce a gaze sample each frame
pub trait InputSource {
    fn sample(&mut self, viewport: &Viewport) -> GazeSample;
}

/// Mouse cursor standing in for the gaze point
#[derive(Debug, Clone, Default)]
pub struct CursorInput {
    cursor_px: Option<Vec2>,
}

impl CursorInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cursor position in screen pixels
    pub fn set_cursor(&mut self, px: Vec2) {
        self.cursor_px = Some(px);
    }
}

impl InputSource for CursorInput {
    fn sample(&mut self, viewport: &Viewport) -> GazeSample {
        // A mouse user is always "present"
        GazeSample {
            position: self.cursor_px.map(|px| viewport.screen_to_world(px)),
            present: true,
        }
    }
}

/// Tracker user-presence state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    Present,
    NotPresent,
    #[default]
    Unknown,
}

/// Eye tracker feed, pushed by the host's SDK binding
#[derive(Debug, Clone, Default)]
pub struct EyeTrackerInput {
    last_viewport: Option<Vec2>,
    presence: Presence,
}

impl EyeTrackerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest lightly-filtered gaze point (normalized viewport) and presence
    pub fn push(&mut self, viewport: Vec2, presence: Presence) {
        self.last_viewport = Some(viewport);
        self.presence = presence;
    }

    pub fn set_presence(&mut self, presence: Presence) {
        self.presence = presence;
    }
}

impl InputSource for EyeTrackerInput {
    fn sample(&mut self, viewport: &Viewport) -> GazeSample {
        let on_screen = |v: &Vec2| (0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y);
        let position = match self.presence {
            Presence::Present => self
                .last_viewport
                .filter(on_screen)
                .map(|v| viewport.viewport_to_world(v)),
            _ => None,
        };
        GazeSample {
            position,
            present: self.presence != Presence::NotPresent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    #[test]
    fn test_camera_extents() {
        let vp = viewport();
        assert_eq!(vp.ortho_size(), 3.6);
        assert_eq!(vp.half_width(), 6.4);
    }

    #[test]
    fn test_viewport_center_is_origin() {
        let vp = viewport();
        assert_eq!(vp.viewport_to_world(Vec2::splat(0.5)), Vec2::ZERO);
        assert_eq!(vp.viewport_to_world(Vec2::ONE), Vec2::new(6.4, 3.6));
    }

    #[test]
    fn test_screen_world_inverse() {
        let vp = viewport();
        let px = Vec2::new(100.0, 650.0);
        let back = vp.world_to_screen(vp.screen_to_world(px));
        assert!((back - px).length() < 1e-3);
    }

    #[test]
    fn test_cursor_always_present() {
        let mut input = CursorInput::new();
        let sample = input.sample(&viewport());
        assert!(sample.present);
        assert!(sample.position.is_none());

        input.set_cursor(Vec2::new(640.0, 360.0));
        assert_eq!(input.sample(&viewport()).position, Some(Vec2::ZERO));
    }

    #[test]
    fn test_eye_off_screen_ignored() {
        let mut input = EyeTrackerInput::new();
        input.push(Vec2::new(1.2, 0.5), Presence::Present);
        let sample = input.sample(&viewport());
        assert!(sample.present);
        assert!(sample.position.is_none());
    }

    #[test]
    fn test_eye_not_present() {
        let mut input = EyeTrackerInput::new();
        input.push(Vec2::splat(0.5), Presence::NotPresent);
        assert_eq!(input.sample(&viewport()), GazeSample::absent());
    }

    #[test]
    fn test_eye_unknown_presence_is_not_absence() {
        let mut input = EyeTrackerInput::new();
        input.push(Vec2::splat(0.5), Presence::Unknown);
        let sample = input.sample(&viewport());
        assert!(sample.present);
        assert!(sample.position.is_none());
    }
}
