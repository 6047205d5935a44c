//! Splash screen shown at launch

use crate::audio::SoundEffect;
use crate::scene::SceneName;
use crate::services::Services;

pub struct LoaderScreen {
    elapsed: f32,
    duration: f32,
    leaving: bool,
}

impl LoaderScreen {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            leaving: false,
        }
    }

    pub fn enter(&mut self, services: &mut Services) {
        services.audio.play(SoundEffect::Loss);
        services.toggle_fade();
    }

    /// Hold the splash, then head to the menu once
    pub fn tick(&mut self, dt: f32, services: &mut Services) {
        self.elapsed += dt;
        if !self.leaving && self.elapsed >= self.duration {
            self.leaving = true;
            services.transition_to(SceneName::Menu);
        }
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving
    }
}
