//! Opponent behavior and animation state
//!
//! The opponent drives four independent animation channels (eyelid, pupil,
//! mouth, head). Only specific combinations mean anything; they are the
//! associated constants on [`ChannelState`]. The opponent counts as idle
//! exactly when its channels equal [`ChannelState::IDLE`].

use glam::Vec2;
use rand::Rng;

use super::schedule::Scheduler;
use crate::audio::{AudioManager, SoundEffect};
use crate::error::{ContestError, Result};
use crate::input::Viewport;
use crate::tuning::{OpponentRig, Tuning};

/// Animation channel codes (eyelid, pupil, mouth, head).
///
/// Eyelid: 0 intro, 1 idle, 2 close, 3 fake.
/// Pupil: 0 idle, 1 move left, 2 move right, 3 roll.
/// Mouth/head: 0 intro, 1 idle, 2 close, 3 action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelState {
    pub eyelid: u8,
    pub pupil: u8,
    pub mouth: u8,
    pub head: u8,
}

impl ChannelState {
    pub const INTRO: Self = Self::new(0, 0, 0, 0);
    pub const IDLE: Self = Self::new(1, 0, 1, 0);
    pub const WIN: Self = Self::new(2, 0, 2, 0);
    pub const MOVE_LEFT: Self = Self::new(1, 1, 3, 0);
    pub const MOVE_RIGHT: Self = Self::new(1, 2, 3, 0);
    pub const ROLL: Self = Self::new(1, 3, 3, 0);
    pub const CLOSE: Self = Self::new(2, 0, 2, 0);
    pub const FAKE: Self = Self::new(3, 0, 2, 0);
    /// Opponent gloats after the player blinks. Not one of the documented
    /// animator combinations but kept as the game shipped it.
    pub const LOSE: Self = Self::new(1, 0, 3, 1);

    pub const fn new(eyelid: u8, pupil: u8, mouth: u8, head: u8) -> Self {
        Self {
            eyelid,
            pupil,
            mouth,
            head,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    pub fn as_array(&self) -> [u8; 4] {
        [self.eyelid, self.pupil, self.mouth, self.head]
    }
}

/// Direction of a move action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    /// Returning to the middle from either edge
    Center,
}

/// What the opponent is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpponentAction {
    #[default]
    Idle,
    Move(MoveDirection),
    Roll,
    Fake,
}

/// Actions that can be drawn at random
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Move,
    Roll,
    Fake,
}

impl ActionKind {
    /// Number of drawable actions
    pub const COUNT: u32 = 3;

    pub fn from_index(index: u32) -> Result<Self> {
        match index {
            0 => Ok(ActionKind::Move),
            1 => Ok(ActionKind::Roll),
            2 => Ok(ActionKind::Fake),
            other => Err(ContestError::UnreachableState(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpponentTask {
    EndAction,
}

/// The staring opponent
#[derive(Debug, Clone)]
pub struct Opponent {
    channels: ChannelState,
    action: OpponentAction,
    active: bool,
    /// When the latest action finished
    end_time: f32,
    /// When the latest animation segment started
    start_time: f32,
    position: Vec2,
    move_start: Vec2,
    move_target: Vec2,
    moving: bool,
    rig: OpponentRig,
    /// |x| of a move target at the screen edge
    edge_x: f32,
    move_duration: f32,
    action_duration: f32,
    fake_cue_delay: f32,
    pending: Scheduler<OpponentTask>,
}

impl Opponent {
    /// New opponent playing its intro (active) animation
    pub fn new(rig: &OpponentRig, tuning: &Tuning, viewport: &Viewport, now: f32) -> Self {
        Self {
            channels: ChannelState::INTRO,
            action: OpponentAction::Idle,
            active: true,
            end_time: now,
            start_time: now,
            position: Vec2::new(rig.start_x, 0.0),
            move_start: Vec2::ZERO,
            move_target: Vec2::ZERO,
            moving: false,
            rig: *rig,
            edge_x: (viewport.half_width() - 0.5 * rig.head_width).max(0.0),
            move_duration: tuning.move_duration,
            action_duration: tuning.action_duration,
            fake_cue_delay: tuning.fake_cue_delay,
            pending: Scheduler::new(),
        }
    }

    /// Apply all four channel codes at once
    pub fn set_state(&mut self, channels: ChannelState, now: f32) {
        self.channels = channels;
        if channels.is_idle() {
            self.active = false;
            self.action = OpponentAction::Idle;
        } else {
            self.active = true;
            self.start_time = now;
        }
    }

    /// Settle into idle at round start
    pub fn reset_to_idle(&mut self, now: f32) {
        self.end_time = now;
        self.set_state(ChannelState::IDLE, now);
    }

    /// Draw a random action and start it. Only call while idle.
    pub fn select_action<R: Rng>(
        &mut self,
        now: f32,
        rng: &mut R,
        audio: &mut AudioManager,
    ) -> Result<OpponentAction> {
        let index = rng.random_range(0..ActionKind::COUNT);
        self.begin_action(index, now, rng, audio)
    }

    /// Start the action with the given index (0 move, 1 roll, 2 fake)
    pub fn begin_action<R: Rng>(
        &mut self,
        index: u32,
        now: f32,
        rng: &mut R,
        audio: &mut AudioManager,
    ) -> Result<OpponentAction> {
        let kind = match ActionKind::from_index(index) {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("Opponent: {}", e);
                return Err(e);
            }
        };

        let action = match kind {
            ActionKind::Move => {
                let (direction, target_x, channels) = if self.position.x < 0.0 {
                    (MoveDirection::Center, 0.0, ChannelState::MOVE_RIGHT)
                } else if self.position.x > 0.0 {
                    (MoveDirection::Center, 0.0, ChannelState::MOVE_LEFT)
                } else if rng.random_bool(0.5) {
                    (MoveDirection::Left, -self.edge_x, ChannelState::MOVE_LEFT)
                } else {
                    (MoveDirection::Right, self.edge_x, ChannelState::MOVE_RIGHT)
                };
                log::debug!("Opponent action: move {:?}", direction);

                self.move_target = Vec2::new(target_x, self.position.y);
                self.set_state(channels, now);
                self.move_start = self.position;
                self.moving = true;
                audio.play(SoundEffect::Move);
                OpponentAction::Move(direction)
            }
            ActionKind::Roll => {
                log::debug!("Opponent action: roll");
                self.set_state(ChannelState::ROLL, now);
                self.pending
                    .schedule(now, self.action_duration, OpponentTask::EndAction);
                audio.play(SoundEffect::Roll);
                OpponentAction::Roll
            }
            ActionKind::Fake => {
                log::debug!("Opponent action: fake");
                self.set_state(ChannelState::FAKE, now);
                self.pending
                    .schedule(now, self.action_duration, OpponentTask::EndAction);
                audio.play_after_delay(SoundEffect::Fake, self.fake_cue_delay);
                OpponentAction::Fake
            }
        };

        self.action = action;
        self.start_time = now;
        self.active = true;
        Ok(action)
    }

    /// Per-tick update: run due deferred tasks, then step any move
    pub fn update(&mut self, now: f32) {
        for task in self.pending.drain_due(now) {
            match task {
                OpponentTask::EndAction => self.end_action(now),
            }
        }
        if self.moving {
            self.advance_move(now);
        }
    }

    /// Interpolate toward the move target; lands exactly on it and ends
    /// the action once the move duration has elapsed
    pub fn advance_move(&mut self, now: f32) {
        let pct = if self.move_duration > 0.0 {
            (now - self.start_time) / self.move_duration
        } else {
            1.0
        };

        if pct >= 1.0 {
            self.position = self.move_target;
            self.end_action(now);
        } else {
            self.position = self.move_start.lerp(self.move_target, pct.max(0.0));
        }
    }

    /// Finish the current action and return to idle
    pub fn end_action(&mut self, now: f32) {
        log::debug!("Opponent action ended, back to idle");
        self.active = false;
        self.moving = false;
        self.end_time = now;
        self.set_state(ChannelState::IDLE, now);
    }

    pub fn channels(&self) -> ChannelState {
        self.channels
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn current_action(&self) -> OpponentAction {
        self.action
    }

    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport (scene setup and tests)
    pub fn place_at(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn move_target(&self) -> Vec2 {
        self.move_target
    }

    /// World-space center of the pupil collider
    pub fn pupil_center(&self) -> Vec2 {
        self.position + self.rig.pupil_offset
    }

    pub fn pupil_radius(&self) -> f32 {
        self.rig.pupil_radius
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::audio::testing::recording_audio;

    fn opponent() -> Opponent {
        Opponent::new(
            &OpponentRig::default(),
            &Tuning::default(),
            &Viewport::new(1280.0, 720.0),
            0.0,
        )
    }

    const ALL_STATES: [ChannelState; 9] = [
        ChannelState::INTRO,
        ChannelState::IDLE,
        ChannelState::WIN,
        ChannelState::MOVE_LEFT,
        ChannelState::MOVE_RIGHT,
        ChannelState::ROLL,
        ChannelState::CLOSE,
        ChannelState::FAKE,
        ChannelState::LOSE,
    ];

    #[test]
    fn test_starts_in_active_intro() {
        let opp = opponent();
        assert_eq!(opp.channels(), ChannelState::INTRO);
        assert!(opp.is_active());
    }

    #[test]
    fn test_only_idle_is_inactive() {
        let mut opp = opponent();
        for state in ALL_STATES {
            opp.set_state(state, 1.0);
            assert_eq!(opp.is_active(), state != ChannelState::IDLE, "{:?}", state);
        }
    }

    #[test]
    fn test_unreachable_index_changes_nothing() {
        let mut opp = opponent();
        let (mut audio, sink) = recording_audio();
        let mut rng = Pcg32::seed_from_u64(1);
        opp.reset_to_idle(0.0);

        let err = opp.begin_action(3, 1.0, &mut rng, &mut audio).unwrap_err();
        assert!(matches!(err, ContestError::UnreachableState(3)));
        assert_eq!(opp.channels(), ChannelState::IDLE);
        assert!(!opp.is_active());
        assert!(sink.played.borrow().is_empty());
    }

    #[test]
    fn test_roll_ends_after_one_second() {
        let mut opp = opponent();
        let (mut audio, sink) = recording_audio();
        let mut rng = Pcg32::seed_from_u64(1);
        opp.reset_to_idle(0.0);

        let action = opp.begin_action(1, 10.0, &mut rng, &mut audio).unwrap();
        assert_eq!(action, OpponentAction::Roll);
        assert_eq!(opp.channels(), ChannelState::ROLL);
        assert_eq!(*sink.played.borrow(), vec![SoundEffect::Roll]);

        opp.update(10.5);
        assert!(opp.is_active());
        opp.update(11.0);
        assert!(!opp.is_active());
        assert_eq!(opp.channels(), ChannelState::IDLE);
        assert_eq!(opp.end_time(), 11.0);
    }

    #[test]
    fn test_fake_cue_is_delayed() {
        let mut opp = opponent();
        let (mut audio, sink) = recording_audio();
        let mut rng = Pcg32::seed_from_u64(1);
        opp.reset_to_idle(0.0);

        opp.begin_action(2, 0.0, &mut rng, &mut audio).unwrap();
        assert_eq!(opp.channels(), ChannelState::FAKE);
        assert!(sink.played.borrow().is_empty());
        assert_eq!(audio.pending().collect::<Vec<_>>(), vec![SoundEffect::Fake]);

        audio.update(0.9);
        assert_eq!(*sink.played.borrow(), vec![SoundEffect::Fake]);
    }

    #[test]
    fn test_move_from_center_goes_to_edge() {
        let mut opp = opponent();
        let (mut audio, sink) = recording_audio();
        let mut rng = Pcg32::seed_from_u64(7);
        opp.reset_to_idle(0.0);

        let action = opp.begin_action(0, 0.0, &mut rng, &mut audio).unwrap();
        // 6.4 half screen width minus half of a 4.0 head
        let edge = 4.4;
        match action {
            OpponentAction::Move(MoveDirection::Left) => {
                assert_eq!(opp.move_target().x, -edge);
                assert_eq!(opp.channels(), ChannelState::MOVE_LEFT);
            }
            OpponentAction::Move(MoveDirection::Right) => {
                assert_eq!(opp.move_target().x, edge);
                assert_eq!(opp.channels(), ChannelState::MOVE_RIGHT);
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(*sink.played.borrow(), vec![SoundEffect::Move]);

        opp.update(0.5);
        assert!((opp.position().x.abs() - edge / 2.0).abs() < 1e-4);
        assert!(opp.is_active());

        opp.update(1.0);
        assert_eq!(opp.position().x.abs(), edge);
        assert!(!opp.is_active());
        assert!(!opp.is_moving());
    }

    #[test]
    fn test_move_from_left_returns_right() {
        let mut opp = opponent();
        let (mut audio, _sink) = recording_audio();
        let mut rng = Pcg32::seed_from_u64(7);
        opp.reset_to_idle(0.0);
        opp.place_at(Vec2::new(-3.0, 0.0));

        let action = opp.begin_action(0, 0.0, &mut rng, &mut audio).unwrap();
        assert_eq!(action, OpponentAction::Move(MoveDirection::Center));
        assert_eq!(opp.channels(), ChannelState::MOVE_RIGHT);
        assert_eq!(opp.move_target(), Vec2::ZERO);
    }

    #[test]
    fn test_move_from_right_returns_left() {
        let mut opp = opponent();
        let (mut audio, _sink) = recording_audio();
        let mut rng = Pcg32::seed_from_u64(7);
        opp.reset_to_idle(0.0);
        opp.place_at(Vec2::new(3.0, 0.0));

        opp.begin_action(0, 0.0, &mut rng, &mut audio).unwrap();
        assert_eq!(opp.channels(), ChannelState::MOVE_LEFT);
    }

    #[test]
    fn test_select_action_is_uniform() {
        let (mut audio, _sink) = recording_audio();
        let seeds = 20u64;
        let mut counts = [0u32; 3];

        for seed in 0..seeds {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut opp = opponent();
            opp.reset_to_idle(0.0);
            for i in 0..1000 {
                let now = i as f32;
                match opp.select_action(now, &mut rng, &mut audio).unwrap() {
                    OpponentAction::Move(_) => counts[0] += 1,
                    OpponentAction::Roll => counts[1] += 1,
                    OpponentAction::Fake => counts[2] += 1,
                    OpponentAction::Idle => panic!("drew idle"),
                }
                opp.end_action(now);
                opp.place_at(Vec2::ZERO);
            }
        }

        for count in counts {
            let per_thousand = count as f64 / seeds as f64;
            assert!(
                (300.0..=367.0).contains(&per_thousand),
                "action drawn {} times per 1000",
                per_thousand
            );
        }
    }

    proptest! {
        #[test]
        fn prop_idle_iff_idle_tuple(e in 0u8..4, p in 0u8..4, m in 0u8..4, h in 0u8..4) {
            let mut opp = opponent();
            let state = ChannelState::new(e, p, m, h);
            opp.set_state(state, 0.0);
            prop_assert_eq!(opp.is_active(), state != ChannelState::IDLE);
            prop_assert_eq!(opp.channels(), state);
        }

        #[test]
        fn prop_move_lands_on_target(start_x in -6.0f32..6.0, late in 0.0f32..3.0) {
            prop_assume!(start_x != 0.0);
            let mut opp = opponent();
            let (mut audio, _sink) = recording_audio();
            let mut rng = Pcg32::seed_from_u64(3);
            opp.reset_to_idle(0.0);
            opp.place_at(Vec2::new(start_x, 0.0));

            opp.begin_action(0, 2.0, &mut rng, &mut audio).unwrap();
            opp.update(2.5);
            prop_assert!(opp.position().x.abs() <= start_x.abs());
            opp.update(3.0 + late);
            prop_assert_eq!(opp.position(), opp.move_target());
            prop_assert!(!opp.is_active());
        }
    }
}
