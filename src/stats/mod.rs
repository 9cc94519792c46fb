//! Statistics repository seam.
//!
//! The engine does not persist anything. Integrators inject a `StatsSink`
//! and the engine forwards per-dart and per-game facts for every player
//! carrying a `user_id`. Recording is fire-and-forget: sink methods
//! return nothing and the engine's state machine never depends on them.

use crate::core::GameMode;

/// External statistics repository.
///
/// Implementations own persistence entirely (format, storage, batching).
/// Called once per accepted dart and once per game-ending win, only for
/// registered players.
pub trait StatsSink {
    /// Record one accepted dart: points scored and cricket marks credited
    /// (0 marks outside cricket mode).
    fn record_throw(&mut self, user_id: &str, points: u32, cricket_marks: u32);

    /// Record a finished game for one player.
    fn record_game_result(
        &mut self,
        user_id: &str,
        mode: GameMode,
        won: bool,
        final_score: i32,
        rounds_played: u32,
    );
}

/// Sink that drops everything; the default for casual games.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStats;

impl StatsSink for NullStats {
    fn record_throw(&mut self, _user_id: &str, _points: u32, _cricket_marks: u32) {}

    fn record_game_result(
        &mut self,
        _user_id: &str,
        _mode: GameMode,
        _won: bool,
        _final_score: i32,
        _rounds_played: u32,
    ) {
    }
}
