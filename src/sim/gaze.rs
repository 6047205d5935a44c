//! Gaze point collider and engagement flags

use glam::Vec2;

use crate::tuning::GazeRig;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Engagement flags for one round.
///
/// Both start false. Neither is ever cleared mid-round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GazeState {
    /// Player has made eye contact
    pub engaged: bool,
    /// Player has broken eye contact
    pub disengaged: bool,
}

impl GazeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_gaze_enter(&mut self) {
        if !self.engaged {
            log::info!("Player engaged with eye");
        }
        self.engaged = true;
    }

    pub fn on_gaze_exit(&mut self) {
        if !self.disengaged {
            log::info!("Player disengaged with eye");
        }
        self.disengaged = true;
    }
}

/// Boundary crossing between the gaze point and the pupil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GazeEvent {
    Enter,
    Exit,
}

/// Circular collider following the gaze point
#[derive(Debug, Clone)]
pub struct GazeCollider {
    /// None until the first usable gaze reading
    position: Option<Vec2>,
    radius: f32,
    enabled: bool,
    touching: bool,
}

impl GazeCollider {
    /// New collider, disabled until the round intro finishes
    pub fn new(rig: &GazeRig) -> Self {
        Self {
            position: None,
            radius: rig.radius,
            enabled: false,
            touching: false,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Turn off collisions; contact is forgotten so re-enabling starts fresh
    pub fn disable(&mut self) {
        self.enabled = false;
        self.touching = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Check overlap with the pupil and report enter/exit transitions
    pub fn detect(&mut self, pupil_center: Vec2, pupil_radius: f32) -> Option<GazeEvent> {
        if !self.enabled {
            return None;
        }
        let overlapping = self
            .position
            .is_some_and(|p| sd_circle(p, pupil_center, pupil_radius + self.radius) <= 0.0);
        match (self.touching, overlapping) {
            (false, true) => {
                self.touching = true;
                Some(GazeEvent::Enter)
            }
            (true, false) => {
                self.touching = false;
                Some(GazeEvent::Exit)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collider() -> GazeCollider {
        GazeCollider::new(&GazeRig { radius: 0.1 })
    }

    #[test]
    fn test_disengaged_is_sticky() {
        let mut gaze = GazeState::new();
        gaze.on_gaze_enter();
        gaze.on_gaze_exit();
        gaze.on_gaze_enter();
        assert!(gaze.engaged);
        assert!(gaze.disengaged);
    }

    #[test]
    fn test_no_reading_never_overlaps() {
        let mut c = collider();
        c.enable();
        assert_eq!(c.detect(Vec2::ZERO, 0.5), None);
        assert_eq!(c.position(), None);
    }

    #[test]
    fn test_disabled_collider_reports_nothing() {
        let mut c = collider();
        c.move_to(Vec2::ZERO);
        assert_eq!(c.detect(Vec2::ZERO, 0.5), None);
    }

    #[test]
    fn test_enter_then_exit() {
        let mut c = collider();
        c.enable();
        c.move_to(Vec2::new(2.0, 0.0));
        assert_eq!(c.detect(Vec2::ZERO, 0.5), None);

        c.move_to(Vec2::new(0.55, 0.0));
        assert_eq!(c.detect(Vec2::ZERO, 0.5), Some(GazeEvent::Enter));
        assert_eq!(c.detect(Vec2::ZERO, 0.5), None);

        c.move_to(Vec2::new(1.0, 0.0));
        assert_eq!(c.detect(Vec2::ZERO, 0.5), Some(GazeEvent::Exit));
    }

    #[test]
    fn test_enable_while_overlapping_enters() {
        let mut c = collider();
        c.move_to(Vec2::ZERO);
        c.enable();
        assert_eq!(c.detect(Vec2::ZERO, 0.5), Some(GazeEvent::Enter));

        c.disable();
        assert!(!c.is_touching());
        c.enable();
        assert_eq!(c.detect(Vec2::ZERO, 0.5), Some(GazeEvent::Enter));
    }

    #[test]
    fn test_sd_circle() {
        assert_eq!(sd_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 1.0), 4.0);
        assert!(sd_circle(Vec2::ZERO, Vec2::ZERO, 1.0) < 0.0);
    }
}
