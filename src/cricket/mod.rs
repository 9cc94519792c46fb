//! Cricket mark and overmark accounting.
//!
//! Each player owns a board of mark counts for the cricket numbers
//! (15-20, bull, plus 0 for recorded misses) and a set of closed
//! numbers. A number closes at its third mark; marks past the close
//! ("overmarks") convert to points while at least one opponent still has
//! the number open.
//!
//! Per-dart resolution is a free function over all boards because the
//! scoring rule depends on opponents' state (`all_others_closed`).
//! Derived per-player summaries are pure reads over the canonical
//! boards; nothing here is cached or refreshed.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Numbers tracked on a cricket board. 0 records misses and never scores.
pub const CRICKET_NUMBERS: [u8; 8] = [0, 15, 16, 17, 18, 19, 20, 25];

/// Numbers that can be closed (everything tracked except 0).
pub const CLOSABLE_NUMBERS: [u8; 7] = [15, 16, 17, 18, 19, 20, 25];

/// Marks required to close a number.
pub const MARKS_TO_CLOSE: u8 = 3;

/// Whether `number` is tracked on a cricket board.
#[must_use]
pub fn is_cricket_number(number: u8) -> bool {
    CRICKET_NUMBERS.contains(&number)
}

/// Point value of a cricket number (bull is worth 25).
#[must_use]
pub fn number_value(number: u8) -> u32 {
    u32::from(number)
}

/// One player's cricket state: mark counts and closed numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketBoard {
    marks: FxHashMap<u8, u8>,
    closed: FxHashSet<u8>,
}

impl CricketBoard {
    /// Fresh board with every tracked number at zero marks.
    #[must_use]
    pub fn new() -> Self {
        let mut marks = FxHashMap::default();
        for number in CRICKET_NUMBERS {
            marks.insert(number, 0);
        }
        Self {
            marks,
            closed: FxHashSet::default(),
        }
    }

    /// Mark count for a number, in `[0, 3]`.
    #[must_use]
    pub fn marks_for(&self, number: u8) -> u8 {
        self.marks.get(&number).copied().unwrap_or(0)
    }

    /// All tracked mark counts.
    #[must_use]
    pub fn marks(&self) -> &FxHashMap<u8, u8> {
        &self.marks
    }

    /// Whether this player has closed `number`.
    #[must_use]
    pub fn is_closed(&self, number: u8) -> bool {
        self.closed.contains(&number)
    }

    /// Closed numbers in ascending order.
    #[must_use]
    pub fn closed_numbers(&self) -> Vec<u8> {
        let mut closed: Vec<u8> = self.closed.iter().copied().collect();
        closed.sort_unstable();
        closed
    }

    /// Whether every closable number is closed (cricket finish condition).
    #[must_use]
    pub fn all_closed(&self) -> bool {
        CLOSABLE_NUMBERS
            .iter()
            .all(|&n| self.marks_for(n) >= MARKS_TO_CLOSE)
    }

    /// Reset all marks and closed numbers.
    pub fn reset(&mut self) {
        for count in self.marks.values_mut() {
            *count = 0;
        }
        self.closed.clear();
    }
}

impl Default for CricketBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of resolving one dart against the boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DartResolution {
    /// Marks consumed toward closing (capped at what was still needed).
    pub effective: u8,
    /// Marks beyond the close, convertible to points.
    pub overmarks: u8,
    /// Whether this dart brought the number to exactly three marks.
    pub just_closed: bool,
    /// Points credited to the thrower's score by this dart.
    pub score_points: u32,
    /// Marks credited toward the thrower's mark average.
    pub stat_marks: u8,
}

/// Resolve one dart for `thrower` against all boards.
///
/// An inner bull (50) is folded to two marks of 25 before resolution.
/// Returns `None` for numbers not tracked in cricket; the dart then
/// neither marks nor scores.
///
/// Scoring per the overmark rule:
/// - Closing marks themselves never score.
/// - Once the thrower has the number closed, further marks score
///   `value * marks` while any opponent still has it open.
/// - Overmarks on the closing dart score immediately under the same
///   opponent condition.
/// - Marks credited to the average stop at the marks still needed once
///   every opponent has closed the number.
pub fn resolve_dart(
    boards: &mut [CricketBoard],
    thrower: usize,
    number: u8,
    marks: u8,
) -> Option<DartResolution> {
    // Inner bull counts as two marks of outer bull everywhere downstream.
    let (number, marks) = if number == 50 { (25, 2) } else { (number, marks) };

    if !is_cricket_number(number) {
        return None;
    }

    let all_others_closed = boards
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != thrower)
        .all(|(_, b)| b.marks_for(number) >= MARKS_TO_CLOSE);

    let board = &mut boards[thrower];
    let prev = board.marks_for(number);
    let needed = MARKS_TO_CLOSE.saturating_sub(prev);

    let effective = marks.min(needed);
    let overmarks = marks.saturating_sub(needed);

    let was_closed = board.is_closed(number);
    let new_count = (prev + effective).min(MARKS_TO_CLOSE);
    board.marks.insert(number, new_count);

    let just_closed = prev < MARKS_TO_CLOSE && new_count == MARKS_TO_CLOSE;
    if just_closed && number != 0 {
        board.closed.insert(number);
    }

    let mut score_points = 0;
    // Marks on an already-closed number score while an opponent is open.
    if was_closed && !just_closed && !all_others_closed {
        score_points += number_value(number) * u32::from(effective);
    }
    // Overmarks convert to points under the same condition.
    if overmarks > 0 && !all_others_closed {
        score_points += number_value(number) * u32::from(overmarks);
        debug!(
            thrower,
            number, overmarks, score_points, "overmarks converted to points"
        );
    }

    // Once every opponent has closed the number, excess marks stop
    // counting toward the thrower's mark average.
    let stat_marks = if all_others_closed && marks > needed {
        needed
    } else {
        marks
    };

    trace!(
        thrower,
        number,
        marks,
        new_count,
        just_closed,
        score_points,
        "dart resolved"
    );

    Some(DartResolution {
        effective,
        overmarks,
        just_closed,
        score_points,
        stat_marks,
    })
}

/// Read-only per-player view of a cricket board.
///
/// Derived on demand from canonical state; presentation layers should
/// request a fresh summary after draining engine events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketSummary {
    pub name: String,
    /// `(number, mark count)` pairs in board order (0, 15..20, 25).
    pub marks: Vec<(u8, u8)>,
    /// Closed numbers in ascending order.
    pub closed: Vec<u8>,
    /// Display line for the closed set.
    pub closed_label: String,
}

/// Build the display summary for one player's board.
#[must_use]
pub fn summarize(name: &str, board: &CricketBoard) -> CricketSummary {
    let marks = CRICKET_NUMBERS
        .iter()
        .map(|&n| (n, board.marks_for(n)))
        .collect();
    let closed = board.closed_numbers();
    let closed_label = if closed.is_empty() {
        "no numbers closed".to_string()
    } else {
        let list: Vec<String> = closed.iter().map(u8::to_string).collect();
        format!("closed: {}", list.join(", "))
    };
    CricketSummary {
        name: name.to_string(),
        marks,
        closed,
        closed_label,
    }
}
