//! Game orchestration: roster, turn pipeline, scoring, cooldown.
//!
//! `GameEngine` owns the player roster (order = turn order), the current
//! round, per-player cricket boards, cached checkout suggestions, and the
//! inter-turn cooldown. All mutating calls must be serialized by the
//! caller (single-owner discipline); the once-per-second cooldown tick is
//! delivered by the owner via [`GameEngine::advance_cooldown_tick`], so
//! no background timer exists.
//!
//! ## Throw pipeline
//!
//! `add_throw` validates against the round, records statistics (inner
//! bull folds to two outer-bull marks for all downstream accounting),
//! applies mode scoring (X01 committed at round completion with the bust
//! rule; cricket applied per dart), refreshes checkout suggestions, and
//! starts the cooldown when the third dart lands. When the cooldown
//! expires the turn rotates and a new round opens.

use tracing::{debug, info};

use crate::checkout::{self, CheckoutCombination};
use crate::core::{GameMode, Player, Round};
use crate::cricket::{self, CricketBoard, CricketSummary};
use crate::events::GameEvent;
use crate::stats::{NullStats, StatsSink};

use serde::{Deserialize, Serialize};

/// Fixed inter-turn delay in seconds.
pub const COOLDOWN_SECONDS: u8 = 5;

/// Minimum roster size for play.
pub const MIN_PLAYERS: usize = 2;

/// Maximum roster size.
pub const MAX_PLAYERS: usize = 4;

/// How many checkout suggestions the engine caches for display.
pub const CHECKOUT_SUGGESTIONS: usize = 5;

/// Inter-turn cooldown state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub active: bool,
    pub seconds_remaining: u8,
}

/// Turn-based darts scoring engine for X01 and Cricket.
pub struct GameEngine {
    mode: GameMode,
    players: Vec<Player>,
    /// One cricket board per roster entry, index-aligned with `players`.
    boards: Vec<CricketBoard>,
    current_player: usize,
    round: Option<Round>,
    round_number: u32,
    checkout: Vec<CheckoutCombination>,
    cooldown: Cooldown,
    /// Latched once a win has been recorded; `check_winner` stays a pure
    /// query afterwards.
    finished: bool,
    stats: Box<dyn StatsSink>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine with an empty roster and no statistics sink.
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self::with_stats(mode, Box::new(NullStats))
    }

    /// Create an engine that forwards statistics to `stats`.
    #[must_use]
    pub fn with_stats(mode: GameMode, stats: Box<dyn StatsSink>) -> Self {
        Self {
            mode,
            players: Vec::new(),
            boards: Vec::new(),
            current_player: 0,
            round: None,
            round_number: 1,
            checkout: Vec::new(),
            cooldown: Cooldown::default(),
            finished: false,
            stats,
            events: Vec::new(),
        }
    }

    // === Queries ===

    /// Current rule set.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Roster in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by name.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// The player whose turn it is, if the roster is non-empty.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Index of the current player in the roster.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// The round being collected, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Sequential round counter (starts at 1).
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Cached checkout suggestions for the current X01 player (top 5).
    #[must_use]
    pub fn checkout_suggestions(&self) -> &[CheckoutCombination] {
        &self.checkout
    }

    /// Current cooldown state.
    #[must_use]
    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// Whether a win has been recorded for this game.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// A player's cricket mark counts.
    #[must_use]
    pub fn cricket_marks(&self, name: &str) -> Option<&rustc_hash::FxHashMap<u8, u8>> {
        let idx = self.player_index(name)?;
        Some(self.boards[idx].marks())
    }

    /// A player's closed cricket numbers, ascending.
    #[must_use]
    pub fn closed_numbers(&self, name: &str) -> Option<Vec<u8>> {
        let idx = self.player_index(name)?;
        Some(self.boards[idx].closed_numbers())
    }

    /// Display summaries for every player's cricket board, in turn order.
    #[must_use]
    pub fn cricket_summaries(&self) -> Vec<CricketSummary> {
        self.players
            .iter()
            .zip(&self.boards)
            .map(|(p, b)| cricket::summarize(p.name(), b))
            .collect()
    }

    /// Drain events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Roster management ===

    /// Add a player to the roster.
    ///
    /// Fails (false) when the roster is full or the name is taken.
    /// `initial_score` defaults to the mode's starting score. The first
    /// player added opens round 1.
    pub fn add_player(
        &mut self,
        name: &str,
        initial_score: Option<i32>,
        user_id: Option<&str>,
    ) -> bool {
        if self.players.len() >= MAX_PLAYERS {
            return false;
        }
        if self.player_index(name).is_some() {
            return false;
        }

        let score = initial_score.unwrap_or_else(|| self.mode.initial_score());
        self.players
            .push(Player::new(name, score, user_id.map(str::to_owned)));
        self.boards.push(CricketBoard::new());
        self.events.push(GameEvent::PlayerAdded {
            name: name.to_string(),
        });

        if self.round.is_none() {
            self.start_new_round();
        }
        true
    }

    /// Remove a player by name.
    ///
    /// Fails (false) below the two-player floor or when the name is not
    /// found. The current-turn index is adjusted to stay valid.
    pub fn remove_player(&mut self, name: &str) -> bool {
        if self.players.len() <= MIN_PLAYERS {
            return false;
        }
        let Some(idx) = self.player_index(name) else {
            return false;
        };

        self.players.remove(idx);
        self.boards.remove(idx);

        if self.current_player >= self.players.len() {
            self.current_player = 0;
        } else if self.current_player > idx {
            self.current_player -= 1;
        }

        self.events.push(GameEvent::PlayerRemoved {
            name: name.to_string(),
        });
        true
    }

    /// Empty the roster and return to the initial state.
    ///
    /// Cancels any active cooldown, discards the round, and resets the
    /// round counter to 1.
    pub fn clear_players(&mut self) {
        self.players.clear();
        self.boards.clear();
        self.current_player = 0;
        self.cooldown = Cooldown::default();
        self.round_number = 1;
        self.round = None;
        self.checkout.clear();
        self.finished = false;
        self.events.push(GameEvent::RosterCleared);
    }

    /// Switch rule sets. A mode change resets the whole game.
    pub fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            self.mode = mode;
            self.reset_game();
        }
    }

    // === Throw pipeline ===

    /// Submit one dart for the current player.
    ///
    /// Returns false without effect on engine state when there is no open
    /// round, the round is complete, the cooldown is running, the roster
    /// is empty, or the `(number, marks)` pair is invalid (the rejected
    /// values stay visible in the round slot).
    pub fn add_throw(&mut self, number: u8, marks: u8) -> bool {
        let throw_allowed = self
            .round
            .as_ref()
            .is_some_and(|r| !r.is_complete())
            && !self.cooldown.active
            && !self.players.is_empty();
        if !throw_allowed {
            self.events.push(GameEvent::ThrowRejected { number, marks });
            return false;
        }

        let round = self.round.as_mut().expect("round checked above");
        if !round.add_throw(number, marks) {
            self.events.push(GameEvent::ThrowRejected { number, marks });
            return false;
        }
        let round_points = round.total_points();
        let round_complete = round.is_complete();
        let player_name = self.players[self.current_player].name().to_string();

        self.events.push(GameEvent::ThrowAccepted {
            player: player_name.clone(),
            number,
            marks,
            round_points,
        });

        self.record_throw_stats(number, marks);

        if self.mode == GameMode::X01 {
            self.update_checkout();
        }

        if round_complete {
            self.commit_round_score(&player_name, round_points);
            self.start_cooldown();
        }

        true
    }

    /// Rewind the most recent dart of the open round.
    ///
    /// No-op while the round is complete or the cooldown is running.
    /// Cricket marks and points already applied for the dart are *not*
    /// reversed; only the round slot is cleared.
    pub fn undo_last_throw(&mut self) {
        if self.cooldown.active {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.is_complete() || !round.undo_last_throw() {
            return;
        }

        if let Some(player) = self.current_player() {
            let player = player.name().to_string();
            self.events.push(GameEvent::ThrowUndone { player });
        }
        if self.mode == GameMode::X01 {
            self.update_checkout();
        }
    }

    // === Cooldown ===

    /// Deliver one elapsed cooldown second.
    ///
    /// The owner calls this once per second while `cooldown().active`.
    /// On reaching zero the current player's round completes, the turn
    /// rotates, and a new round opens.
    pub fn advance_cooldown_tick(&mut self) {
        if !self.cooldown.active {
            return;
        }
        self.cooldown.seconds_remaining = self.cooldown.seconds_remaining.saturating_sub(1);
        self.events.push(GameEvent::CooldownTick {
            seconds_remaining: self.cooldown.seconds_remaining,
        });

        if self.cooldown.seconds_remaining == 0 {
            self.cooldown.active = false;
            self.complete_turn();
        }
    }

    // === Win detection ===

    /// Check whether the game has a winner.
    ///
    /// X01: the first player at exactly zero. Cricket: among players with
    /// every closable number closed, the highest score, ties broken by
    /// roster order. The first positive answer records a leg win for the
    /// winner, a leg loss for everyone else, and forwards game results to
    /// the statistics sink for registered players; subsequent calls are
    /// pure queries.
    pub fn check_winner(&mut self) -> Option<String> {
        let winner_idx = match self.mode {
            GameMode::X01 => self.players.iter().position(|p| p.score() == 0),
            GameMode::Cricket => {
                let mut best: Option<usize> = None;
                for (idx, player) in self.players.iter().enumerate() {
                    if !self.boards[idx].all_closed() {
                        continue;
                    }
                    // Strictly-greater keeps the first of tied scores.
                    match best {
                        Some(b) if self.players[b].score() >= player.score() => {}
                        _ => best = Some(idx),
                    }
                }
                best
            }
        }?;

        let winner_name = self.players[winner_idx].name().to_string();
        if !self.finished {
            self.record_game_results(winner_idx);
            self.finished = true;
            self.events.push(GameEvent::GameWon {
                winner: winner_name.clone(),
            });
        }
        Some(winner_name)
    }

    /// Restore game-start state: mode-default scores, fresh cricket
    /// boards, round 1, no cooldown. Cross-leg statistics survive.
    pub fn reset_game(&mut self) {
        let initial = self.mode.initial_score();
        for player in &mut self.players {
            player.set_score(initial);
        }
        for board in &mut self.boards {
            board.reset();
        }
        self.checkout.clear();
        self.cooldown = Cooldown::default();
        self.current_player = 0;
        self.round_number = 1;
        self.finished = false;
        self.start_new_round();
        self.events.push(GameEvent::GameReset);
    }

    // === Internals ===

    fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name() == name)
    }

    fn start_new_round(&mut self) {
        match self.players.get(self.current_player) {
            Some(player) => {
                let name = player.name().to_string();
                self.round = Some(Round::new(name.clone(), self.round_number));
                self.events.push(GameEvent::TurnStarted {
                    player: name,
                    round_number: self.round_number,
                });
                self.update_checkout();
            }
            None => self.round = None,
        }
    }

    /// Record statistics and apply per-dart cricket effects for one
    /// accepted dart. An inner bull is recorded as two marks of outer
    /// bull for all downstream accounting.
    fn record_throw_stats(&mut self, number: u8, marks: u8) {
        let (number, marks) = if number == 50 { (25, 2) } else { (number, marks) };
        let idx = self.current_player;

        let (points, cricket_marks) = match self.mode {
            GameMode::X01 => (u32::from(number) * u32::from(marks), 0),
            GameMode::Cricket => {
                match cricket::resolve_dart(&mut self.boards, idx, number, marks) {
                    Some(res) => {
                        let player = &mut self.players[idx];
                        if res.score_points > 0 {
                            player.set_score(player.score() + res.score_points as i32);
                        }
                        player.add_cricket_marks(u32::from(res.stat_marks));
                        if res.just_closed {
                            self.events.push(GameEvent::NumberClosed {
                                player: self.players[idx].name().to_string(),
                                number,
                            });
                        }
                        if res.score_points > 0 {
                            self.events.push(GameEvent::CricketPoints {
                                player: self.players[idx].name().to_string(),
                                number,
                                points: res.score_points,
                            });
                        }
                        (res.score_points, u32::from(res.stat_marks))
                    }
                    // Off-number darts in cricket neither mark nor score.
                    None => (0, 0),
                }
            }
        };

        let player = &mut self.players[idx];
        player.add_throw(points);
        if let Some(user_id) = player.user_id() {
            let user_id = user_id.to_string();
            self.stats.record_throw(&user_id, points, cricket_marks);
        }
    }

    /// Commit a completed round. X01 subtracts the round total unless it
    /// would go negative (bust: score unchanged, no other penalty).
    /// Cricket was already applied per dart.
    fn commit_round_score(&mut self, player_name: &str, round_points: u32) {
        if self.mode == GameMode::X01 {
            let player = &mut self.players[self.current_player];
            let remaining = player.score() - round_points as i32;
            if remaining < 0 {
                debug!(player = player_name, round_points, "bust, score unchanged");
                self.events.push(GameEvent::Bust {
                    player: player_name.to_string(),
                    attempted: round_points,
                });
            } else {
                player.set_score(remaining);
            }
        }

        self.events.push(GameEvent::RoundCompleted {
            player: player_name.to_string(),
            round_number: self.round_number,
            points: round_points,
        });
    }

    fn start_cooldown(&mut self) {
        self.cooldown = Cooldown {
            active: true,
            seconds_remaining: COOLDOWN_SECONDS,
        };
        self.events.push(GameEvent::CooldownStarted {
            seconds: COOLDOWN_SECONDS,
        });
    }

    /// Close out the current player's turn and rotate to the next.
    fn complete_turn(&mut self) {
        if let Some(player) = self.players.get_mut(self.current_player) {
            player.complete_round();
        }
        if !self.players.is_empty() {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
        self.round_number += 1;
        self.start_new_round();
    }

    /// Refresh the checkout cache for the current X01 player against the
    /// score left after the darts already accepted this round.
    fn update_checkout(&mut self) {
        if self.mode != GameMode::X01 || self.players.is_empty() {
            self.checkout.clear();
            return;
        }

        let score = self.players[self.current_player].score();
        let round_points = self.round.as_ref().map_or(0, Round::total_points);
        let remaining = score - round_points as i32;

        if remaining <= 0 {
            self.checkout.clear();
        } else {
            let mut combos = checkout::combinations(remaining as u32);
            combos.truncate(CHECKOUT_SUGGESTIONS);
            self.checkout = combos;
        }
        self.events.push(GameEvent::CheckoutUpdated {
            suggestions: self.checkout.len(),
        });
    }

    /// Record leg results and forward game facts for registered players.
    fn record_game_results(&mut self, winner_idx: usize) {
        info!(
            winner = self.players[winner_idx].name(),
            mode = %self.mode,
            "game won"
        );
        for (idx, player) in self.players.iter_mut().enumerate() {
            if idx == winner_idx {
                player.record_leg_win();
            } else {
                player.record_leg_loss();
            }
        }

        let rounds_played = self.round_number.saturating_sub(1);
        for (idx, player) in self.players.iter().enumerate() {
            if let Some(user_id) = player.user_id() {
                self.stats.record_game_result(
                    user_id,
                    self.mode,
                    idx == winner_idx,
                    player.score(),
                    rounds_played,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x01_engine() -> GameEngine {
        let mut engine = GameEngine::new(GameMode::X01);
        assert!(engine.add_player("Alice", None, None));
        assert!(engine.add_player("Bob", None, None));
        engine
    }

    fn finish_cooldown(engine: &mut GameEngine) {
        for _ in 0..COOLDOWN_SECONDS {
            engine.advance_cooldown_tick();
        }
    }

    #[test]
    fn test_roster_limits() {
        let mut engine = GameEngine::new(GameMode::X01);
        assert!(engine.add_player("P1", None, None));
        assert!(engine.add_player("P2", None, None));
        assert!(engine.add_player("P3", None, None));
        assert!(engine.add_player("P4", None, None));
        assert!(!engine.add_player("P5", None, None));
        assert!(!engine.add_player("P1", None, None)); // duplicate name
        assert_eq!(engine.players().len(), 4);
    }

    #[test]
    fn test_remove_player_floor() {
        let mut engine = x01_engine();
        assert!(!engine.remove_player("Alice")); // would drop below 2
        engine.add_player("Carol", None, None);
        assert!(engine.remove_player("Alice"));
        assert!(!engine.remove_player("Nobody"));
        assert_eq!(engine.players().len(), 2);
    }

    #[test]
    fn test_remove_adjusts_current_index() {
        let mut engine = x01_engine();
        engine.add_player("Carol", None, None);
        // Alice's turn (index 0); removing Alice keeps index 0 (now Bob).
        assert!(engine.remove_player("Alice"));
        assert_eq!(engine.current_player().unwrap().name(), "Bob");
    }

    #[test]
    fn test_default_scores_per_mode() {
        let engine = x01_engine();
        assert_eq!(engine.player("Alice").unwrap().score(), 501);

        let mut cricket = GameEngine::new(GameMode::Cricket);
        cricket.add_player("Alice", None, None);
        assert_eq!(cricket.player("Alice").unwrap().score(), 0);
    }

    #[test]
    fn test_x01_round_commit() {
        let mut engine = x01_engine();
        assert!(engine.add_throw(20, 3));
        assert!(engine.add_throw(19, 3));
        assert!(engine.add_throw(7, 1));
        // 60 + 57 + 7 = 124 off 501.
        assert_eq!(engine.player("Alice").unwrap().score(), 377);
        assert!(engine.cooldown().active);
    }

    #[test]
    fn test_throw_rejected_during_cooldown() {
        let mut engine = x01_engine();
        engine.add_throw(1, 1);
        engine.add_throw(1, 1);
        engine.add_throw(1, 1);
        assert!(engine.cooldown().active);
        assert!(!engine.add_throw(20, 1));
    }

    #[test]
    fn test_cooldown_rotates_turn() {
        let mut engine = x01_engine();
        engine.add_throw(1, 1);
        engine.add_throw(1, 1);
        engine.add_throw(1, 1);
        assert_eq!(engine.cooldown().seconds_remaining, COOLDOWN_SECONDS);

        finish_cooldown(&mut engine);
        assert!(!engine.cooldown().active);
        assert_eq!(engine.current_player().unwrap().name(), "Bob");
        assert_eq!(engine.round_number(), 2);
        assert_eq!(engine.player("Alice").unwrap().total_rounds(), 1);
    }

    #[test]
    fn test_x01_bust_leaves_score() {
        let mut engine = x01_engine();
        let alice = engine.players.iter_mut().find(|p| p.name() == "Alice").unwrap();
        alice.set_score(40);

        engine.add_throw(15, 1);
        engine.add_throw(15, 1);
        engine.add_throw(15, 1); // 45 > 40: bust
        assert_eq!(engine.player("Alice").unwrap().score(), 40);
    }

    #[test]
    fn test_x01_winner() {
        let mut engine = x01_engine();
        let alice = engine.players.iter_mut().find(|p| p.name() == "Alice").unwrap();
        alice.set_score(32);

        assert!(engine.check_winner().is_none());
        engine.add_throw(16, 2); // exactly 32
        engine.add_throw(0, 1);
        engine.add_throw(0, 1);
        assert_eq!(engine.check_winner().as_deref(), Some("Alice"));
        assert_eq!(engine.player("Alice").unwrap().legs_won(), 1);
        assert_eq!(engine.player("Bob").unwrap().legs_played(), 1);
    }

    #[test]
    fn test_winner_recorded_once() {
        let mut engine = x01_engine();
        let alice = engine.players.iter_mut().find(|p| p.name() == "Alice").unwrap();
        alice.set_score(0);

        assert_eq!(engine.check_winner().as_deref(), Some("Alice"));
        assert_eq!(engine.check_winner().as_deref(), Some("Alice"));
        assert_eq!(engine.player("Alice").unwrap().legs_won(), 1);
        assert_eq!(engine.player("Bob").unwrap().legs_played(), 1);
    }

    #[test]
    fn test_checkout_suggestions_update() {
        let mut engine = x01_engine();
        let alice = engine.players.iter_mut().find(|p| p.name() == "Alice").unwrap();
        alice.set_score(100);
        // Cache refreshes on the next accepted dart.
        engine.add_throw(20, 3); // 40 left
        let combos = engine.checkout_suggestions();
        assert!(!combos.is_empty());
        assert!(combos.len() <= CHECKOUT_SUGGESTIONS);
        assert!(combos.iter().any(|c| c.display_text == "D20"));
    }

    #[test]
    fn test_checkout_empty_when_unreachable() {
        let mut engine = x01_engine();
        // 501 > 170: no suggestions at the start of a leg.
        engine.add_throw(5, 1);
        assert!(engine.checkout_suggestions().is_empty());
    }

    #[test]
    fn test_undo_respects_guards() {
        let mut engine = x01_engine();
        engine.add_throw(20, 1);
        engine.undo_last_throw();
        assert_eq!(engine.current_round().unwrap().current_index(), 0);

        engine.add_throw(20, 1);
        engine.add_throw(20, 1);
        engine.add_throw(20, 1);
        // Complete round + cooldown: undo is a no-op.
        engine.undo_last_throw();
        assert!(engine.current_round().unwrap().is_complete());
        assert_eq!(engine.player("Alice").unwrap().score(), 441);
    }

    #[test]
    fn test_mode_change_resets() {
        let mut engine = x01_engine();
        engine.add_throw(20, 3);
        engine.set_mode(GameMode::Cricket);
        assert_eq!(engine.mode(), GameMode::Cricket);
        assert_eq!(engine.player("Alice").unwrap().score(), 0);
        assert_eq!(engine.round_number(), 1);
        assert!(!engine.cooldown().active);
    }

    #[test]
    fn test_clear_players_resets_state() {
        let mut engine = x01_engine();
        engine.add_throw(1, 1);
        engine.add_throw(1, 1);
        engine.add_throw(1, 1);
        engine.clear_players();
        assert!(engine.players().is_empty());
        assert!(engine.current_round().is_none());
        assert!(!engine.cooldown().active);
        assert_eq!(engine.round_number(), 1);
    }

    #[test]
    fn test_cricket_summaries_in_turn_order() {
        let mut engine = GameEngine::new(GameMode::Cricket);
        engine.add_player("Alice", None, None);
        engine.add_player("Bob", None, None);
        engine.add_throw(20, 3);
        let summaries = engine.cricket_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Alice");
        assert!(summaries[0].marks.contains(&(20, 3)));
        assert_eq!(summaries[1].closed_label, "no numbers closed");
    }

    #[test]
    fn test_events_drain() {
        let mut engine = x01_engine();
        engine.drain_events();
        engine.add_throw(20, 1);
        let events = engine.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ThrowAccepted { number: 20, marks: 1, .. })));
        assert!(engine.drain_events().is_empty());
    }
}
