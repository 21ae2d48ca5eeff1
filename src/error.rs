//! Error types for the session engine.

use thiserror::Error;

use crate::core::{CardLabel, GameId};

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors surfaced by catalog lookups and turn resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown game: {id}")]
    UnknownGame { id: GameId },

    /// The card is not part of the active deck. Signals an integration bug
    /// in the caller, not a user mistake.
    #[error("card {card} is not in the {game} deck")]
    InvalidCardReference { card: CardLabel, game: GameId },

    #[error("no game has been started")]
    NoActiveGame,
}
