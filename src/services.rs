//! Session-wide services
//!
//! One instance lives for the whole application and is lent to whichever
//! scene is active.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, AudioSink};
use crate::input::Viewport;
use crate::scene::{SceneDirector, SceneName};
use crate::score::ScoreLedger;
use crate::settings::Settings;
use crate::tuning::Tuning;

pub struct Services {
    pub tuning: Tuning,
    pub settings: Settings,
    pub audio: AudioManager,
    pub score: ScoreLedger,
    pub director: SceneDirector,
    pub rng: Pcg32,
}

impl Services {
    pub fn new(tuning: Tuning, settings: Settings, sink: Box<dyn AudioSink>, seed: u64) -> Self {
        let audio = AudioManager::new(sink, &tuning, &settings);
        let director = SceneDirector::new(SceneName::Loader, tuning.transition_duration);
        Self {
            tuning,
            settings,
            audio,
            score: ScoreLedger::new(),
            director,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Move every service clock to `now`; returns a scene switch that came due
    pub fn update(&mut self, now: f32) -> Option<SceneName> {
        self.audio.update(now);
        let next = self.director.update(now);
        if next.is_some() {
            self.audio.stop_all_sfx();
        }
        next
    }

    /// Flip the screen fade and the music fade together
    pub fn toggle_fade(&mut self) {
        self.director.toggle_fade();
        self.audio.toggle_music_fade();
    }

    /// Fade out, then switch to `scene` once the fade has finished
    pub fn transition_to(&mut self, scene: SceneName) {
        self.toggle_fade();
        let delay = self.director.transition_duration();
        self.director.switch_scene_after_delay(scene, delay);
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_layout(&self.tuning.layout)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::audio::testing::RecordingSink;

    /// Services with a recording audio sink
    pub fn services_with(tuning: Tuning) -> (Services, RecordingSink) {
        let sink = RecordingSink::default();
        let services = Services::new(tuning, Settings::default(), Box::new(sink.clone()), 42);
        (services, sink)
    }

    pub fn services() -> (Services, RecordingSink) {
        services_with(Tuning::default())
    }
}
