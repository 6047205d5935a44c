//! Contest simulation module
//!
//! All gameplay logic lives here. It only talks to the host through the
//! services passed into each tick:
//! - Time arrives as `dt`, never read from a wall clock
//! - Randomness comes from the injected seeded RNG
//! - Delayed effects go through a [`Scheduler`], drained on the same thread

pub mod gaze;
pub mod opponent;
pub mod round;
pub mod schedule;

pub use gaze::{GazeCollider, GazeEvent, GazeState, sd_circle};
pub use opponent::{ActionKind, ChannelState, MoveDirection, Opponent, OpponentAction};
pub use round::{Round, RoundOutcome, RoundPhase, RoundResult, win_duration};
pub use schedule::{Scheduled, Scheduler};

use rand::Rng;

/// Uniform draw from `[a, b]`; bounds may come in either order
pub fn uniform<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.random_range(lo..=hi)
}
