//! Round lifecycle
//!
//! A round waits through the opponent's wake-up intro, starts on first eye
//! contact and ends when the player either outlasts the win threshold or
//! looks away. Neither outcome is decided while the opponent is mid-action.

use rand::Rng;

use super::gaze::{GazeCollider, GazeEvent, GazeState};
use super::opponent::{ChannelState, Opponent};
use super::schedule::Scheduler;
use super::uniform;
use crate::audio::SoundEffect;
use crate::error::{ContestError, Result};
use crate::input::{GazeSample, Viewport};
use crate::scene::SceneName;
use crate::services::Services;
use crate::tuning::Tuning;

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for first eye contact
    NotStarted,
    /// Contest running
    Started,
    /// Player outlasted the opponent; end animation playing
    PlayerWin,
    /// Player looked away; end animation playing
    PlayerLoss,
    /// Reported to the score ledger
    Ended,
}

/// Result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundResult {
    #[default]
    Pending,
    PlayerWin,
    PlayerLoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundOutcome {
    /// Seconds of eye contact needed to win
    pub win_duration: f32,
    /// Seconds since the round started
    pub elapsed: f32,
    pub result: RoundResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundTask {
    EnableCollisions,
    EndRound,
}

/// Win threshold: the base duration plus a random 3-5 s per prior win
pub fn win_duration<R: Rng>(tuning: &Tuning, num_wins: u32, rng: &mut R) -> f32 {
    tuning.base_win_duration
        + uniform(rng, tuning.win_increment_min, tuning.win_increment_max) * num_wins as f32
}

/// One staring contest
pub struct Round {
    phase: RoundPhase,
    outcome: RoundOutcome,
    now: f32,
    start_time: f32,
    gaze: GazeState,
    collider: GazeCollider,
    opponent: Opponent,
    pending: Scheduler<RoundTask>,
    tuning: Tuning,
}

impl Round {
    /// Build the round from the scene layout.
    ///
    /// Fails with `ConfigurationMissing` if the opponent or gaze point is
    /// absent; there is no way to play without them.
    pub fn new(tuning: &Tuning) -> Result<Self> {
        let rig = tuning
            .layout
            .opponent
            .ok_or(ContestError::ConfigurationMissing("opponent"))?;
        let gaze_rig = tuning
            .layout
            .gaze_point
            .ok_or(ContestError::ConfigurationMissing("gaze point"))?;
        let viewport = Viewport::from_layout(&tuning.layout);

        Ok(Self {
            phase: RoundPhase::NotStarted,
            outcome: RoundOutcome::default(),
            now: 0.0,
            start_time: 0.0,
            gaze: GazeState::new(),
            collider: GazeCollider::new(&gaze_rig),
            opponent: Opponent::new(&rig, tuning, &viewport, 0.0),
            pending: Scheduler::new(),
            tuning: tuning.clone(),
        })
    }

    /// Scene entry: fade in, snore through the intro, then wake up
    pub fn enter(&mut self, services: &mut Services) {
        services.toggle_fade();
        self.pending
            .schedule(self.now, self.tuning.intro_duration, RoundTask::EnableCollisions);
        services.audio.play(SoundEffect::SnoreStart);
        services
            .audio
            .play_after_delay(SoundEffect::SnoreStart, self.tuning.snore_repeat_delay);
    }

    /// Advance the round by `dt` seconds.
    ///
    /// Order within a tick: gaze input, opponent update, collision events,
    /// deferred tasks, round start, outcome arbitration, opponent actions.
    pub fn tick(&mut self, dt: f32, sample: &GazeSample, services: &mut Services) {
        self.now += dt;
        let now = self.now;

        if let Some(position) = sample.position {
            self.collider.move_to(position);
        }
        if !sample.present && self.phase == RoundPhase::Started && !self.gaze.disengaged {
            log::info!("User not present");
            self.on_gaze_exit();
        }

        self.opponent.update(now);

        match self
            .collider
            .detect(self.opponent.pupil_center(), self.opponent.pupil_radius())
        {
            Some(GazeEvent::Enter) => self.on_gaze_enter(),
            Some(GazeEvent::Exit) => self.on_gaze_exit(),
            None => {}
        }

        for task in self.pending.drain_due(now) {
            match task {
                RoundTask::EnableCollisions => {
                    log::info!("Collisions enabled");
                    if !self.is_over() {
                        self.collider.enable();
                    }
                    services.audio.play(SoundEffect::Loss);
                }
                RoundTask::EndRound => self.end_round(services),
            }
        }

        if self.gaze.engaged && self.phase == RoundPhase::NotStarted {
            self.start(services);
        }

        if matches!(
            self.phase,
            RoundPhase::Started | RoundPhase::PlayerWin | RoundPhase::PlayerLoss
        ) {
            self.outcome.elapsed = now - self.start_time;
        }

        if self.phase == RoundPhase::Started {
            self.check_outcome(services);
        }

        if self.phase == RoundPhase::Started && !self.opponent.is_active() {
            let cooldown = uniform(
                &mut services.rng,
                self.tuning.action_cooldown_min,
                self.tuning.action_cooldown_max,
            );
            if now - self.opponent.end_time() >= cooldown {
                // Unreachable draws are logged by the opponent and skipped
                let _ = self
                    .opponent
                    .select_action(now, &mut services.rng, &mut services.audio);
            }
        }
    }

    /// Gaze point touched the pupil
    pub fn on_gaze_enter(&mut self) {
        self.gaze.on_gaze_enter();
    }

    /// Gaze point left the pupil; the collider stays off for the rest of
    /// the round
    pub fn on_gaze_exit(&mut self) {
        self.gaze.on_gaze_exit();
        self.collider.disable();
    }

    fn start(&mut self, services: &mut Services) {
        self.phase = RoundPhase::Started;
        self.start_time = self.now;
        self.opponent.reset_to_idle(self.now);
        self.outcome = RoundOutcome {
            win_duration: win_duration(&self.tuning, services.score.num_wins, &mut services.rng),
            elapsed: 0.0,
            result: RoundResult::Pending,
        };
        log::info!(
            "Round started, win after {:.2}s ({} prior wins)",
            self.outcome.win_duration,
            services.score.num_wins
        );
    }

    fn check_outcome(&mut self, services: &mut Services) {
        let opponent_idle = !self.opponent.is_active();
        if self.outcome.elapsed >= self.outcome.win_duration
            && opponent_idle
            && !self.gaze.disengaged
        {
            self.player_win(services);
        } else if self.gaze.disengaged && opponent_idle {
            self.player_loss(services);
        }
    }

    fn player_win(&mut self, services: &mut Services) {
        log::info!("Player wins after {:.2}s", self.outcome.elapsed);
        self.collider.disable();
        self.phase = RoundPhase::PlayerWin;
        self.outcome.result = RoundResult::PlayerWin;
        services.score.record_win();
        self.opponent.set_state(ChannelState::WIN, self.now);
        services
            .audio
            .play_after_delay(SoundEffect::Win, self.tuning.win_cue_delay);
        self.pending
            .schedule(self.now, self.tuning.round_end_delay, RoundTask::EndRound);
    }

    fn player_loss(&mut self, services: &mut Services) {
        log::info!("Player loses after {:.2}s", self.outcome.elapsed);
        self.collider.disable();
        self.phase = RoundPhase::PlayerLoss;
        self.outcome.result = RoundResult::PlayerLoss;
        self.opponent.set_state(ChannelState::LOSE, self.now);
        services.audio.play(SoundEffect::Loss);
        self.pending
            .schedule(self.now, self.tuning.round_end_delay, RoundTask::EndRound);
    }

    fn end_round(&mut self, services: &mut Services) {
        if !matches!(self.phase, RoundPhase::PlayerWin | RoundPhase::PlayerLoss) {
            return;
        }
        self.outcome.elapsed = self.now - self.start_time;
        log::info!("Ending round ({:.3}s)", self.outcome.elapsed);
        self.phase = RoundPhase::Ended;
        services.score.record_round(self.outcome.elapsed);
        services.transition_to(SceneName::Summary);
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn gaze(&self) -> GazeState {
        self.gaze
    }

    pub fn collider(&self) -> &GazeCollider {
        &self.collider
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    /// Seconds since the scene was entered
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Round is over (win/loss decided)
    pub fn is_over(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::PlayerWin | RoundPhase::PlayerLoss | RoundPhase::Ended
        )
    }
}
