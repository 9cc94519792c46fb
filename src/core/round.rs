//! One player's turn: exactly three throw slots.
//!
//! A round is a small state machine:
//!
//! - **Collecting** (`current_index < 3`): `add_throw` writes into the
//!   slot at `current_index`; valid throws advance the index, invalid
//!   throws leave it in place so the next call overwrites the same slot.
//! - **Complete** (`current_index == 3`): no further throws are accepted;
//!   only `undo_last_throw` transitions back to Collecting.

use serde::{Deserialize, Serialize};

use super::throw::Throw;

/// Number of darts per turn.
pub const THROWS_PER_ROUND: usize = 3;

/// One player's turn worth of throws.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    player_name: String,
    round_number: u32,
    throws: [Throw; THROWS_PER_ROUND],
    current_index: usize,
}

impl Round {
    /// Start a fresh round for a player.
    #[must_use]
    pub fn new(player_name: impl Into<String>, round_number: u32) -> Self {
        Self {
            player_name: player_name.into(),
            round_number,
            throws: [Throw::new(); THROWS_PER_ROUND],
            current_index: 0,
        }
    }

    /// Name of the player this round belongs to.
    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Sequential round number within the game (starts at 1).
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// All three throw slots (unthrown slots are invalid throws).
    #[must_use]
    pub fn throws(&self) -> &[Throw; THROWS_PER_ROUND] {
        &self.throws
    }

    /// Index of the next slot to fill, in `[0, 3]`.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The slot the next throw will land in, if the round is still open.
    #[must_use]
    pub fn current_throw(&self) -> Option<&Throw> {
        self.throws.get(self.current_index)
    }

    /// Whether all three slots hold accepted throws.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_index >= THROWS_PER_ROUND
    }

    /// Sum of points over valid throws; invalid and unfilled slots add 0.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.throws.iter().map(Throw::points).sum()
    }

    /// Record a throw into the current slot.
    ///
    /// Returns false if the round is complete or the `(number, marks)`
    /// pair is invalid. A rejected pair stays written in the slot so a
    /// display layer can show what was entered; the next `add_throw`
    /// overwrites it.
    pub fn add_throw(&mut self, number: u8, marks: u8) -> bool {
        if self.is_complete() {
            return false;
        }

        let slot = &mut self.throws[self.current_index];
        slot.set(number, marks);

        if slot.is_valid() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Rewind the most recent accepted throw, clearing its slot.
    ///
    /// Returns false (no-op) when no throws have been accepted yet.
    pub fn undo_last_throw(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.throws[self.current_index].clear();
        true
    }

    /// Reset the in-progress slot without rewinding accepted throws.
    pub fn clear_current_throw(&mut self) {
        if let Some(slot) = self.throws.get_mut(self.current_index) {
            slot.clear();
        }
    }

    /// Wipe all slots and return to the start of the round.
    pub fn clear(&mut self) {
        for slot in &mut self.throws {
            slot.clear();
        }
        self.current_index = 0;
    }

    /// Human-readable summary for display layers.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_complete() {
            format!("Round {}: {} points", self.round_number, self.total_points())
        } else {
            format!("Round {}: in progress", self.round_number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_is_collecting() {
        let round = Round::new("Alice", 1);
        assert_eq!(round.player_name(), "Alice");
        assert_eq!(round.round_number(), 1);
        assert_eq!(round.current_index(), 0);
        assert!(!round.is_complete());
        assert_eq!(round.total_points(), 0);
    }

    #[test]
    fn test_three_throws_complete() {
        let mut round = Round::new("Alice", 1);
        assert!(round.add_throw(20, 3));
        assert!(round.add_throw(19, 1));
        assert!(round.add_throw(5, 2));
        assert!(round.is_complete());
        assert_eq!(round.total_points(), 60 + 19 + 10);
    }

    #[test]
    fn test_fourth_throw_rejected() {
        let mut round = Round::new("Alice", 1);
        round.add_throw(20, 1);
        round.add_throw(20, 1);
        round.add_throw(20, 1);
        let before = round.total_points();
        assert!(!round.add_throw(20, 3));
        assert_eq!(round.total_points(), before);
    }

    #[test]
    fn test_invalid_throw_keeps_slot() {
        let mut round = Round::new("Alice", 1);
        assert!(!round.add_throw(25, 3)); // triple bull is not a dart
        assert_eq!(round.current_index(), 0);
        // The rejected values remain visible in the slot.
        assert_eq!(round.throws()[0].number(), 25);
        assert_eq!(round.throws()[0].marks(), 3);
        assert_eq!(round.total_points(), 0);

        // Next throw overwrites the same slot.
        assert!(round.add_throw(25, 2));
        assert_eq!(round.current_index(), 1);
        assert_eq!(round.total_points(), 50);
    }

    #[test]
    fn test_undo_last_throw() {
        let mut round = Round::new("Alice", 1);
        round.add_throw(20, 3);
        round.add_throw(19, 3);
        assert!(round.undo_last_throw());
        assert_eq!(round.current_index(), 1);
        assert_eq!(round.total_points(), 60);
        assert!(!round.throws()[1].is_valid());
    }

    #[test]
    fn test_undo_on_empty_round_is_noop() {
        let mut round = Round::new("Alice", 1);
        assert!(!round.undo_last_throw());
        assert_eq!(round.current_index(), 0);
    }

    #[test]
    fn test_undo_reopens_complete_round() {
        let mut round = Round::new("Alice", 1);
        round.add_throw(20, 1);
        round.add_throw(20, 1);
        round.add_throw(20, 1);
        assert!(round.is_complete());
        assert!(round.undo_last_throw());
        assert!(!round.is_complete());
        assert_eq!(round.total_points(), 40);
    }

    #[test]
    fn test_misses_count_toward_completion() {
        let mut round = Round::new("Alice", 1);
        assert!(round.add_throw(0, 1));
        assert!(round.add_throw(0, 1));
        assert!(round.add_throw(0, 1));
        assert!(round.is_complete());
        assert_eq!(round.total_points(), 0);
    }

    #[test]
    fn test_clear_current_throw() {
        let mut round = Round::new("Alice", 1);
        round.add_throw(20, 1);
        assert!(!round.add_throw(21, 1)); // rejected, stays in slot 1
        round.clear_current_throw();
        assert_eq!(round.throws()[1].number(), 0);
        assert_eq!(round.current_index(), 1);
    }

    #[test]
    fn test_clear_round() {
        let mut round = Round::new("Alice", 3);
        round.add_throw(20, 3);
        round.add_throw(20, 3);
        round.clear();
        assert_eq!(round.current_index(), 0);
        assert_eq!(round.total_points(), 0);
        assert!(!round.is_complete());
    }

    #[test]
    fn test_labels() {
        let mut round = Round::new("Alice", 2);
        assert_eq!(round.label(), "Round 2: in progress");
        round.add_throw(20, 2);
        round.add_throw(20, 2);
        round.add_throw(20, 2);
        assert_eq!(round.label(), "Round 2: 120 points");
    }
}
