//! Core types: card labels, game ids, RNG, configuration.
//!
//! These are the leaf building blocks shared by the catalog, the session
//! engine and the auto-player.

pub mod card;
pub mod rng;
pub mod config;

pub use card::{CardLabel, GameId, GroupKey};
pub use rng::{GameRng, GameRngState};
pub use config::{EngineConfig, TimerPolicy};
