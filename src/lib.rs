//! # darts-core
//!
//! A turn-based darts scoring engine for 2-4 players, supporting X01
//! (countdown with double-out) and Cricket (number closing with overmark
//! scoring).
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: no rendering, persistence, or timers. The
//!    engine consumes a roster and raw throw input and emits state a
//!    presentation layer renders and a statistics sink records.
//!
//! 2. **Single owner**: mutating calls are not synchronized internally;
//!    callers serialize access and deliver the once-per-second cooldown
//!    tick themselves via `advance_cooldown_tick`.
//!
//! 3. **Failures as values**: invalid throws, roster violations, busts,
//!    and calls during cooldown all resolve to "no effect" plus a return
//!    value to branch on. Nothing panics, nothing is thrown.
//!
//! ## Modules
//!
//! - `core`: game mode, throws, rounds, players
//! - `checkout`: double-out finishing combinations for X01
//! - `cricket`: mark/overmark accounting and board summaries
//! - `stats`: injected statistics repository seam
//! - `events`: typed events for presentation layers
//! - `engine`: the orchestrating `GameEngine`

pub mod core;
pub mod checkout;
pub mod cricket;
pub mod stats;
pub mod events;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{GameMode, Player, Round, Throw};

pub use crate::checkout::{can_checkout, combinations, CheckoutCombination, Dart, MAX_CHECKOUT};

pub use crate::cricket::{CricketBoard, CricketSummary, CLOSABLE_NUMBERS, CRICKET_NUMBERS};

pub use crate::stats::{NullStats, StatsSink};

pub use crate::events::GameEvent;

pub use crate::engine::{
    Cooldown, GameEngine, CHECKOUT_SUGGESTIONS, COOLDOWN_SECONDS, MAX_PLAYERS, MIN_PLAYERS,
};
