//! # concentration
//!
//! Session engine for a concentration (memory matching) card game.
//!
//! A deck of labeled cards is shuffled and laid out face-down. The player
//! reveals cards one at a time; every card sharing a group key (the first
//! character of its label) must be revealed in a row to complete a set.
//! Completed sets leave the board and score points, a wrong card flips the
//! pending ones back after a delay and costs a point.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: Every operation takes a `SessionState` value.
//!    There is no global game; any number of sessions can coexist.
//!
//! 2. **Rendering Is External**: The engine reports effects through the
//!    `Renderer` trait and never touches a UI directly.
//!
//! 3. **Time Is Driven**: Delays (mismatch revert, auto-play step) live on a
//!    virtual `Timeline` advanced by the caller, so runs are reproducible.
//!
//! ## Modules
//!
//! - `core`: Card labels, group keys, game ids, RNG, configuration
//! - `catalog`: Built-in decks and game lookup
//! - `session`: Session state, restart snapshot, turn resolution
//! - `autoplay`: Single-step auto-player
//! - `render`: Renderer trait and stock renderers
//! - `schedule`: Virtual-time timer queue
//! - `table`: Driver wiring sessions, renderer and timers together
//! - `error`: Error types

pub mod core;
pub mod catalog;
pub mod session;
pub mod autoplay;
pub mod render;
pub mod schedule;
pub mod table;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardLabel, GameId, GroupKey,
    GameRng, GameRngState,
    EngineConfig, TimerPolicy,
};

pub use crate::catalog::{Deck, DeckCatalog};

pub use crate::session::{
    GameInfo, SelectionSource, SessionSnapshot, SessionState, TurnOutcome, TurnResolver,
};

pub use crate::autoplay::{advance_auto_play, AutoPlayStep, AutoPlayer};

pub use crate::render::{NullRenderer, RecordingRenderer, RenderEffect, Renderer};

pub use crate::schedule::{Timeline, TimerId};

pub use crate::table::Table;

pub use crate::error::{GameError, Result};
