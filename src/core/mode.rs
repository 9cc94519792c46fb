//! Game mode selection.

use serde::{Deserialize, Serialize};

/// The two supported rule sets.
///
/// - `X01`: countdown from a fixed starting score (501) to exactly zero,
///   finishing on a double.
/// - `Cricket`: close the numbers 15-20 and bull by accumulating three
///   marks each; overmarks convert to points until every opponent has
///   closed the number too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    X01,
    Cricket,
}

impl GameMode {
    /// Default starting score for a new player in this mode.
    #[must_use]
    pub const fn initial_score(self) -> i32 {
        match self {
            GameMode::X01 => 501,
            GameMode::Cricket => 0,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::X01 => write!(f, "X01"),
            GameMode::Cricket => write!(f, "Cricket"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_scores() {
        assert_eq!(GameMode::X01.initial_score(), 501);
        assert_eq!(GameMode::Cricket.initial_score(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GameMode::X01), "X01");
        assert_eq!(format!("{}", GameMode::Cricket), "Cricket");
    }
}
