//! Deck catalog: the static games available for play.
//!
//! Each game is a list of card labels. A label's leading character names
//! the set the card belongs to; all cards of a set must be revealed in a
//! row to complete it.

pub mod deck;
pub mod registry;

pub use deck::Deck;
pub use registry::DeckCatalog;
