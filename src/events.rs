//! Typed engine events.
//!
//! After every externally observable mutation the engine appends an event
//! to an internal queue; callers drain it with
//! [`GameEngine::drain_events`](crate::engine::GameEngine::drain_events)
//! and re-render whatever the events touch. Transport past that point is
//! the integrator's choice (direct poll, channel, rebroadcast).

use serde::{Deserialize, Serialize};

/// One externally observable engine mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player joined the roster.
    PlayerAdded { name: String },
    /// A player left the roster.
    PlayerRemoved { name: String },
    /// The roster was emptied.
    RosterCleared,

    /// A dart was accepted into the current round.
    ThrowAccepted {
        player: String,
        number: u8,
        marks: u8,
        round_points: u32,
    },
    /// A dart was rejected (invalid values, complete round, or cooldown).
    ThrowRejected { number: u8, marks: u8 },
    /// The most recent accepted dart was rewound.
    ThrowUndone { player: String },

    /// Checkout suggestions were recomputed (X01 only).
    CheckoutUpdated { suggestions: usize },

    /// A cricket number reached three marks for a player.
    NumberClosed { player: String, number: u8 },
    /// A cricket dart converted marks to points.
    CricketPoints { player: String, number: u8, points: u32 },

    /// The current round collected its third dart.
    RoundCompleted {
        player: String,
        round_number: u32,
        points: u32,
    },
    /// An X01 round total would have gone below zero; score unchanged.
    Bust { player: String, attempted: u32 },

    /// The inter-turn cooldown began.
    CooldownStarted { seconds: u8 },
    /// One cooldown second elapsed.
    CooldownTick { seconds_remaining: u8 },
    /// A new round opened for the next player.
    TurnStarted { player: String, round_number: u32 },

    /// A player satisfied the win condition; results were recorded.
    GameWon { winner: String },
    /// Scores, boards, and rounds were reset to game start.
    GameReset,
}
