//! Score bookkeeping across rounds
//!
//! Lives for the whole session; the round writes to it and the summary
//! scene reads it back.

use serde::{Deserialize, Serialize};

/// Cumulative wins and the length of the latest round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreLedger {
    /// Total victories this session
    pub num_wins: u32,
    /// Seconds the latest round lasted
    pub last_duration: f32,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the length of a finished round
    pub fn record_round(&mut self, duration: f32) {
        self.last_duration = duration;
    }

    /// Count a victory
    pub fn record_win(&mut self) {
        self.num_wins += 1;
    }

    /// Zero everything (new session from the main menu)
    pub fn reset(&mut self) {
        log::info!("Score reset");
        self.num_wins = 0;
        self.last_duration = 0.0;
    }

    /// Text shown on the summary screen
    pub fn summary(&self) -> String {
        format!(
            "Contest Summary\nRound Time: {}\nTotal Wins: {}",
            format_duration(self.last_duration),
            self.num_wins
        )
    }
}

/// Format seconds as `M:SS.mmm`
pub fn format_duration(seconds: f32) -> String {
    let total_ms = (seconds.max(0.0) as f64 * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{}:{:02}.{:03}", minutes, secs, millis)
}
