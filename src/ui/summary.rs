//! Round summary

use crate::audio::SoundEffect;
use crate::scene::SceneName;
use crate::services::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryButton {
    /// Play another round, keeping the win streak
    Continue,
    /// Back to the menu; the streak is forgotten
    MainMenu,
}

#[derive(Debug, Default)]
pub struct SummaryScreen {
    text: String,
    leaving: bool,
}

impl SummaryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, services: &mut Services) {
        services.toggle_fade();
        self.text = services.score.summary();
    }

    pub fn press(&mut self, button: SummaryButton, services: &mut Services) {
        if self.leaving {
            return;
        }
        self.leaving = true;
        services.audio.play(SoundEffect::ButtonClick);
        match button {
            SummaryButton::Continue => services.transition_to(SceneName::Game),
            SummaryButton::MainMenu => {
                services.score.reset();
                services.transition_to(SceneName::Menu);
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
