//! Core engine types: game mode, throws, rounds, players.
//!
//! These are the leaf building blocks the engine orchestrates. They carry
//! no cross-player logic; that lives in `cricket` and `engine`.

pub mod mode;
pub mod throw;
pub mod round;
pub mod player;

pub use mode::GameMode;
pub use throw::Throw;
pub use round::Round;
pub use player::Player;
