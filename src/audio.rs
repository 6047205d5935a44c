//! Audio cues and music fades
//!
//! The core only decides *which* cue plays and *when*; mixing and playback
//! belong to an [`AudioSink`] supplied by the host.

use crate::settings::Settings;
use crate::sim::Scheduler;
use crate::tuning::Tuning;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Opponent starts a move
    Move,
    /// Opponent rolls its eye
    Roll,
    /// Opponent fakes a blink
    Fake,
    /// Player wins the round
    Win,
    /// Player loses the round (also the wake-up sting)
    Loss,
    /// Menu button pressed
    ButtonClick,
    /// Sleeping opponent breathes in
    SnoreStart,
    /// Sleeping opponent breathes out
    SnoreEnd,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Move => "move",
            SoundEffect::Roll => "roll",
            SoundEffect::Fake => "fake",
            SoundEffect::Win => "win",
            SoundEffect::Loss => "loss",
            SoundEffect::ButtonClick => "button-click",
            SoundEffect::SnoreStart => "snore-start",
            SoundEffect::SnoreEnd => "snore-end",
        }
    }
}

/// Host playback backend
pub trait AudioSink {
    /// Fire-and-forget one-shot effect
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Cut any effect still playing
    fn stop_all_sfx(&mut self);
    /// Rewind the background music to the beginning and start it
    fn restart_music(&mut self) {}
    /// Background music gain for this frame
    fn set_music_volume(&mut self, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    music_volume: f32,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} (vol {:.2})", effect.as_str(), volume);
    }

    fn stop_all_sfx(&mut self) {
        log::debug!("sfx stopped");
    }

    fn restart_music(&mut self) {
        log::debug!("music restarted");
    }

    fn set_music_volume(&mut self, volume: f32) {
        if (volume - self.music_volume).abs() > f32::EPSILON {
            log::trace!("music volume {:.2}", volume);
        }
        self.music_volume = volume;
    }
}

/// Background music fade in/out.
///
/// Starts silent and held. Each toggle flips the direction and restarts
/// the fade clock; once the volume reaches the end of its range it holds
/// there until the next toggle.
#[derive(Debug, Clone)]
pub struct MusicFade {
    fade_duration: f32,
    max_volume: f32,
    fading_in: bool,
    hold: bool,
    start_time: f32,
    volume: f32,
}

impl MusicFade {
    pub fn new(fade_duration: f32, max_volume: f32) -> Self {
        Self {
            fade_duration,
            max_volume: max_volume.clamp(0.0, 1.0),
            fading_in: false,
            hold: true,
            start_time: 0.0,
            volume: 0.0,
        }
    }

    /// Flip fade direction (call before a transition)
    pub fn toggle(&mut self, now: f32) {
        self.fading_in = !self.fading_in;
        self.hold = false;
        self.start_time = now;
    }

    /// Begin fading in from the current level
    pub fn fade_in(&mut self, now: f32) {
        self.fading_in = true;
        self.hold = false;
        self.start_time = now;
    }

    pub fn update(&mut self, now: f32) {
        if self.hold {
            return;
        }
        let pct = if self.fade_duration > 0.0 {
            ((now - self.start_time) / self.fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if self.fading_in {
            if self.volume < self.max_volume {
                self.volume = pct.min(self.max_volume);
            } else {
                self.volume = self.max_volume;
                self.hold = true;
            }
        } else if self.volume > 0.0 {
            self.volume = (1.0 - pct).min(self.max_volume);
        } else {
            self.volume = 0.0;
            self.hold = true;
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_fading_in(&self) -> bool {
        self.fading_in
    }

    pub fn is_held(&self) -> bool {
        self.hold
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    delayed: Scheduler<SoundEffect>,
    music: MusicFade,
    snore_end_delay: f32,
    sfx_volume: f32,
    music_gain: f32,
    now: f32,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, tuning: &Tuning, settings: &Settings) -> Self {
        Self {
            sink,
            delayed: Scheduler::new(),
            music: MusicFade::new(tuning.music_fade_duration, tuning.music_max_volume),
            snore_end_delay: tuning.snore_end_delay,
            sfx_volume: settings.effective_sfx_volume(),
            music_gain: settings.effective_music_volume(),
            now: 0.0,
        }
    }

    /// Pick up volume changes from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_gain = settings.effective_music_volume();
    }

    /// Advance to `now`: fire due delayed cues and step the music fade
    pub fn update(&mut self, now: f32) {
        self.now = now;
        for effect in self.delayed.drain_due(now) {
            self.play(effect);
        }
        self.music.update(now);
        self.sink
            .set_music_volume(self.music.volume() * self.music_gain);
    }

    /// Play a sound effect now
    pub fn play(&mut self, effect: SoundEffect) {
        if effect == SoundEffect::SnoreStart {
            self.delayed
                .schedule(self.now, self.snore_end_delay, SoundEffect::SnoreEnd);
        }
        if self.sfx_volume <= 0.0 {
            return;
        }
        self.sink.play(effect, self.sfx_volume);
    }

    /// Play a sound effect `delay` seconds from now
    pub fn play_after_delay(&mut self, effect: SoundEffect, delay: f32) {
        self.delayed.schedule(self.now, delay, effect);
    }

    pub fn stop_all_sfx(&mut self) {
        self.sink.stop_all_sfx();
    }

    /// Rewind the music and fade it in
    pub fn start_music(&mut self) {
        self.sink.restart_music();
        self.music.fade_in(self.now);
    }

    /// Flip the music fade direction
    pub fn toggle_music_fade(&mut self) {
        self.music.toggle(self.now);
    }

    pub fn music(&self) -> &MusicFade {
        &self.music
    }

    /// Effective music volume after settings gain
    pub fn music_volume(&self) -> f32 {
        self.music.volume() * self.music_gain
    }

    /// Cues waiting on a delay
    pub fn pending(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        self.delayed.pending().map(|s| s.task)
    }
}
