//! A single dart throw.
//!
//! A throw is a `(number, marks)` pair with derived validity and points.
//! Invalid combinations never error; they simply yield `valid = false`
//! and zero points, and the round state machine refuses to advance past
//! them.
//!
//! ## Valid domain
//!
//! - `number` 1-20: any marks 1-3 (single, double, triple)
//! - `number` 25 (outer bull): marks 1 or 2
//! - `number` 50 (inner bull): marks 1 or 2
//! - `number` 0 (miss): marks must be 1

use serde::{Deserialize, Serialize};

/// Outer bull segment value.
pub const OUTER_BULL: u8 = 25;

/// Inner bull segment value.
pub const INNER_BULL: u8 = 50;

/// A single dart's landing segment and multiplier.
///
/// Setting values recomputes validity and points atomically; there is no
/// invalid-state error path. A freshly created or cleared throw is `(0, 0)`
/// and invalid ("unthrown").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Throw {
    number: u8,
    marks: u8,
    valid: bool,
}

impl Throw {
    /// Create an unthrown (invalid) dart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a throw from values, validating immediately.
    #[must_use]
    pub fn from_values(number: u8, marks: u8) -> Self {
        let mut t = Self::default();
        t.set(number, marks);
        t
    }

    /// Get the segment number.
    #[must_use]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Get the multiplier (1 = single, 2 = double, 3 = triple).
    #[must_use]
    pub fn marks(&self) -> u8 {
        self.marks
    }

    /// Whether the `(number, marks)` pair is a legal dart.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Point value: `number * marks` when valid, 0 otherwise.
    #[must_use]
    pub fn points(&self) -> u32 {
        if self.valid {
            u32::from(self.number) * u32::from(self.marks)
        } else {
            0
        }
    }

    /// Set both values and revalidate.
    pub fn set(&mut self, number: u8, marks: u8) {
        self.number = number;
        self.marks = marks;
        self.valid = Self::validate(number, marks);
    }

    /// Reset to unthrown `(0, 0)`.
    pub fn clear(&mut self) {
        self.number = 0;
        self.marks = 0;
        self.valid = false;
    }

    /// Human-readable label for display layers.
    #[must_use]
    pub fn label(&self) -> String {
        if !self.valid {
            return "unthrown".to_string();
        }
        match self.number {
            0 => "miss".to_string(),
            OUTER_BULL => format!("outer bull ({})", self.marks),
            INNER_BULL => format!("inner bull ({})", self.marks),
            n => {
                let mark_text = match self.marks {
                    1 => "single",
                    2 => "double",
                    3 => "triple",
                    _ => unreachable!("valid throws have marks 1-3"),
                };
                format!("{} - {}", n, mark_text)
            }
        }
    }

    fn validate(number: u8, marks: u8) -> bool {
        let valid_number = number <= 20 || number == OUTER_BULL || number == INNER_BULL;
        let valid_marks = match number {
            // Bulls only exist as single or double.
            OUTER_BULL | INNER_BULL => marks == 1 || marks == 2,
            // A miss carries one "mark" so it still consumes a slot.
            0 => marks == 1,
            _ => (1..=3).contains(&marks),
        };
        valid_number && valid_marks
    }
}
