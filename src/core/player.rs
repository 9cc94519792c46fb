//! Per-player score and running statistics.
//!
//! A `Player` lives for one game session. Besides the mode-dependent
//! `score` it accumulates cross-leg statistics: throw average, cricket
//! mark average (per three-throw round), and leg win rate. Derived
//! averages are stored pre-rounded for display (2 decimals for point and
//! mark averages, 1 for the win percentage).

use serde::{Deserialize, Serialize};

/// A roster entry with score and cumulative statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: i32,
    /// Present when this player is tied to a persisted statistics record.
    user_id: Option<String>,

    total_throws: u32,
    total_points: u32,
    average_score: f64,

    total_cricket_marks: u32,
    average_cricket_marks: f64,
    total_rounds: u32,

    legs_won: u32,
    legs_played: u32,
    win_percentage: f64,
}

impl Player {
    /// Create a player with a starting score.
    #[must_use]
    pub fn new(name: impl Into<String>, initial_score: i32, user_id: Option<String>) -> Self {
        Self {
            name: name.into(),
            score: initial_score,
            user_id,
            total_throws: 0,
            total_points: 0,
            average_score: 0.0,
            total_cricket_marks: 0,
            average_cricket_marks: 0.0,
            total_rounds: 0,
            legs_won: 0,
            legs_played: 0,
            win_percentage: 0.0,
        }
    }

    /// Player display name (unique within a game).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current game score.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Replace the current score (engine scoring commits go through here).
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Persisted-statistics identifier, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Whether this player is tied to a persisted statistics record.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.user_id.is_some()
    }

    /// Darts thrown across the session.
    #[must_use]
    pub fn total_throws(&self) -> u32 {
        self.total_throws
    }

    /// Points accumulated across the session (statistics, not game score).
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Points per throw, rounded to 2 decimals.
    #[must_use]
    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    /// Cricket marks accumulated across the session.
    #[must_use]
    pub fn total_cricket_marks(&self) -> u32 {
        self.total_cricket_marks
    }

    /// Cricket marks per three-throw round, rounded to 2 decimals.
    #[must_use]
    pub fn average_cricket_marks(&self) -> f64 {
        self.average_cricket_marks
    }

    /// Completed rounds across the session.
    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Legs won across the session.
    #[must_use]
    pub fn legs_won(&self) -> u32 {
        self.legs_won
    }

    /// Legs played across the session.
    #[must_use]
    pub fn legs_played(&self) -> u32 {
        self.legs_played
    }

    /// Leg win rate in percent, rounded to 1 decimal.
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        self.win_percentage
    }

    /// Record one thrown dart worth `points` toward the statistics.
    ///
    /// The throw-count denominator feeds both averages, so the cricket
    /// mark average is refreshed here as well.
    pub fn add_throw(&mut self, points: u32) {
        self.total_throws += 1;
        self.total_points += points;
        self.update_average_score();
        self.update_average_cricket_marks();
    }

    /// Credit cricket marks toward the mark average.
    pub fn add_cricket_marks(&mut self, marks: u32) {
        self.total_cricket_marks += marks;
        self.update_average_cricket_marks();
    }

    /// Record that this player finished a round (turn).
    pub fn complete_round(&mut self) {
        self.total_rounds += 1;
        self.update_average_cricket_marks();
    }

    /// Record a leg win: increments both won and played.
    pub fn record_leg_win(&mut self) {
        self.legs_won += 1;
        self.legs_played += 1;
        self.update_win_percentage();
    }

    /// Record a leg loss: increments only played.
    pub fn record_leg_loss(&mut self) {
        self.legs_played += 1;
        self.update_win_percentage();
    }

    /// Zero all cumulative statistics (score is untouched).
    pub fn reset_stats(&mut self) {
        self.total_throws = 0;
        self.total_points = 0;
        self.average_score = 0.0;
        self.total_cricket_marks = 0;
        self.average_cricket_marks = 0.0;
        self.total_rounds = 0;
        self.legs_won = 0;
        self.legs_played = 0;
        self.win_percentage = 0.0;
    }

    fn update_average_score(&mut self) {
        self.average_score = if self.total_throws > 0 {
            round_to(f64::from(self.total_points) / f64::from(self.total_throws), 2)
        } else {
            0.0
        };
    }

    fn update_average_cricket_marks(&mut self) {
        // Marks per round of three throws; the denominator counts every
        // throw, misses included.
        self.average_cricket_marks = if self.total_throws > 0 {
            let rounds = f64::from(self.total_throws) / 3.0;
            round_to(f64::from(self.total_cricket_marks) / rounds, 2)
        } else {
            0.0
        };
    }

    fn update_win_percentage(&mut self) {
        self.win_percentage = if self.legs_played > 0 {
            round_to(f64::from(self.legs_won) / f64::from(self.legs_played) * 100.0, 1)
        } else {
            0.0
        };
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
