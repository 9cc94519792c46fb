//! Double-out checkout search for X01.
//!
//! Pure, exhaustive enumeration: for a remaining score in `[1, 170]`,
//! list every 1-, 2- and 3-dart sequence over the board domain
//! `{1..20, 25} x {single, double, triple}` whose points sum to exactly
//! the remaining score, with the final dart a double (or a single outer
//! bull, which counts as a finishing double).
//!
//! Two source quirks are preserved deliberately:
//!
//! - Non-final darts are unconstrained, so an unreal `25x3` can appear
//!   mid-sequence.
//! - The bull renders as `"Bull"` whether hit single or double, so a
//!   single-bull finish and a double-bull finish are indistinguishable
//!   in the display text.
//!
//! Results are generated shortest-sequence first and stably sorted by
//! `total_points`. All combinations for one query share the same total,
//! so the sort keeps the generation order; the ordering contract is by
//! total points, not by dart count.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Board numbers a dart can score on (misses cannot finish anything).
pub const CHECKOUT_NUMBERS: [u8; 21] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 25,
];

/// Multipliers: single, double, triple.
const CHECKOUT_MARKS: [u8; 3] = [1, 2, 3];

/// Highest score reachable with three darts in this domain.
pub const MAX_CHECKOUT: u32 = 170;

/// One dart of a checkout sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dart {
    pub number: u8,
    pub marks: u8,
}

impl Dart {
    /// Point value of this dart.
    #[must_use]
    pub fn points(self) -> u32 {
        u32::from(self.number) * u32::from(self.marks)
    }

    /// Whether this dart may legally end a double-out leg.
    ///
    /// A double anywhere on the board, or a single outer bull.
    #[must_use]
    pub fn is_finisher(self) -> bool {
        self.marks == 2 || (self.number == 25 && self.marks == 1)
    }

    /// Dartboard notation: `20`, `D20`, `T20`, and `Bull` for 25 at any marks.
    #[must_use]
    pub fn notation(self) -> String {
        if self.number == 25 {
            return "Bull".to_string();
        }
        match self.marks {
            1 => self.number.to_string(),
            2 => format!("D{}", self.number),
            3 => format!("T{}", self.number),
            _ => format!("{}x{}", self.number, self.marks),
        }
    }
}

/// A finishing sequence of 1-3 darts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCombination {
    /// The darts, in throwing order; the last one is the finisher.
    pub darts: SmallVec<[Dart; 3]>,
    /// Per-dart notation joined with `" + "`.
    pub display_text: String,
    /// Sum of points over the darts (always the queried score).
    pub total_points: u32,
}

impl CheckoutCombination {
    fn from_darts(darts: SmallVec<[Dart; 3]>) -> Self {
        let display_text = darts
            .iter()
            .map(|d| d.notation())
            .collect::<Vec<_>>()
            .join(" + ");
        let total_points = darts.iter().map(|d| d.points()).sum();
        Self {
            darts,
            display_text,
            total_points,
        }
    }
}

/// All double-out finishes for `remaining_score`, ordered by total points.
///
/// Empty for scores outside `[1, 170]`. Callers typically keep only the
/// first few entries.
#[must_use]
pub fn combinations(remaining_score: u32) -> Vec<CheckoutCombination> {
    let mut out = Vec::new();

    if remaining_score == 0 || remaining_score > MAX_CHECKOUT {
        return out;
    }

    find_one_dart(remaining_score, &mut out);
    find_two_dart(remaining_score, &mut out);
    find_three_dart(remaining_score, &mut out);

    out.sort_by_key(|c| c.total_points);
    out
}

/// Whether any double-out finish exists for `remaining_score`.
#[must_use]
pub fn can_checkout(remaining_score: u32) -> bool {
    !combinations(remaining_score).is_empty()
}

fn darts_iter() -> impl Iterator<Item = Dart> {
    CHECKOUT_NUMBERS.into_iter().flat_map(|number| {
        CHECKOUT_MARKS
            .into_iter()
            .map(move |marks| Dart { number, marks })
    })
}

fn find_one_dart(target: u32, out: &mut Vec<CheckoutCombination>) {
    for dart in darts_iter() {
        if dart.points() == target && dart.is_finisher() {
            out.push(CheckoutCombination::from_darts(SmallVec::from_slice(&[dart])));
        }
    }
}

fn find_two_dart(target: u32, out: &mut Vec<CheckoutCombination>) {
    for first in darts_iter() {
        let first_points = first.points();
        if first_points >= target {
            continue;
        }
        for last in darts_iter() {
            if first_points + last.points() == target && last.is_finisher() {
                out.push(CheckoutCombination::from_darts(SmallVec::from_slice(&[
                    first, last,
                ])));
            }
        }
    }
}

fn find_three_dart(target: u32, out: &mut Vec<CheckoutCombination>) {
    for first in darts_iter() {
        let first_points = first.points();
        if first_points >= target {
            continue;
        }
        for second in darts_iter() {
            let two_points = first_points + second.points();
            if two_points >= target {
                continue;
            }
            for last in darts_iter() {
                if two_points + last.points() == target && last.is_finisher() {
                    out.push(CheckoutCombination::from_darts(SmallVec::from_slice(&[
                        first, second, last,
                    ])));
                }
            }
        }
    }
}
