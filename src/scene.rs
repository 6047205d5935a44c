//! Scene flow
//!
//! Scenes ask for a switch by logical name; the director fires it after the
//! requested delay and the composition root swaps the active scene.

use crate::sim::Scheduler;

/// Logical scene names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneName {
    /// Splash shown at launch
    Loader,
    /// Main menu
    Menu,
    /// The contest itself
    Game,
    /// Round summary
    Summary,
}

impl SceneName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneName::Loader => "Loader",
            SceneName::Menu => "Menu",
            SceneName::Game => "Game",
            SceneName::Summary => "Summary",
        }
    }
}

/// Full-screen fade between scenes.
///
/// `level` is the cover opacity: 1.0 is fully black. Starts covered.
#[derive(Debug, Clone)]
pub struct ScreenFade {
    duration: f32,
    covering: bool,
    start_time: f32,
}

impl ScreenFade {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            covering: true,
            start_time: f32::NEG_INFINITY,
        }
    }

    /// Flip between revealing and covering, restarting the ramp
    pub fn toggle(&mut self, now: f32) {
        self.covering = !self.covering;
        self.start_time = now;
    }

    pub fn level(&self, now: f32) -> f32 {
        let t = if self.duration > 0.0 {
            ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if self.covering { t } else { 1.0 - t }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_covering(&self) -> bool {
        self.covering
    }
}

/// Pending scene switches and the screen fade
#[derive(Debug, Clone)]
pub struct SceneDirector {
    current: SceneName,
    fade: ScreenFade,
    pending: Scheduler<SceneName>,
    now: f32,
}

impl SceneDirector {
    pub fn new(first: SceneName, transition_duration: f32) -> Self {
        Self {
            current: first,
            fade: ScreenFade::new(transition_duration),
            pending: Scheduler::new(),
            now: 0.0,
        }
    }

    /// Advance to `now`; returns the scene to load if a switch came due
    pub fn update(&mut self, now: f32) -> Option<SceneName> {
        self.now = now;
        let next = self.pending.drain_due(now).pop()?;
        log::info!("Switching scene {} -> {}", self.current.as_str(), next.as_str());
        self.current = next;
        Some(next)
    }

    /// Load `scene` after `delay` seconds
    pub fn switch_scene_after_delay(&mut self, scene: SceneName, delay: f32) {
        log::debug!("Scene {} requested in {:.2}s", scene.as_str(), delay);
        self.pending.schedule(self.now, delay, scene);
    }

    pub fn toggle_fade(&mut self) {
        self.fade.toggle(self.now);
    }

    /// Seconds a fade takes; the usual delay before a switch
    pub fn transition_duration(&self) -> f32 {
        self.fade.duration()
    }

    pub fn fade_level(&self) -> f32 {
        self.fade.level(self.now)
    }

    pub fn current(&self) -> SceneName {
        self.current
    }

    /// A switch is queued
    pub fn is_switching(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_starts_covered_and_reveals() {
        let mut fade = ScreenFade::new(1.0);
        assert_eq!(fade.level(0.0), 1.0);

        fade.toggle(0.0);
        assert_eq!(fade.level(0.5), 0.5);
        assert_eq!(fade.level(2.0), 0.0);

        fade.toggle(2.0);
        assert_eq!(fade.level(2.25), 0.25);
        assert_eq!(fade.level(3.0), 1.0);
    }

    #[test]
    fn test_switch_after_delay() {
        let mut director = SceneDirector::new(SceneName::Loader, 1.0);
        director.update(3.0);
        director.switch_scene_after_delay(SceneName::Menu, 1.0);
        assert!(director.is_switching());

        assert_eq!(director.update(3.5), None);
        assert_eq!(director.update(4.0), Some(SceneName::Menu));
        assert_eq!(director.current(), SceneName::Menu);
        assert!(!director.is_switching());
    }

    #[test]
    fn test_last_due_switch_wins() {
        let mut director = SceneDirector::new(SceneName::Summary, 1.0);
        director.switch_scene_after_delay(SceneName::Game, 1.0);
        director.switch_scene_after_delay(SceneName::Menu, 1.0);
        assert_eq!(director.update(1.0), Some(SceneName::Menu));
    }
}
