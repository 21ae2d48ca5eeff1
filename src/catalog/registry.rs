//! Deck catalog for game lookup.
//!
//! The `DeckCatalog` maps game ids to their decks. It is read-only once
//! built and keeps games in registration order.

use rustc_hash::FxHashMap;

use super::deck::Deck;
use crate::core::{CardLabel, GameId};
use crate::error::{GameError, Result};

const POKER: [&str; 52] = [
    "2C", "2D", "2H", "2S",
    "3C", "3D", "3H", "3S",
    "4C", "4D", "4H", "4S",
    "5C", "5D", "5H", "5S",
    "6C", "6D", "6H", "6S",
    "7C", "7D", "7H", "7S",
    "8C", "8D", "8H", "8S",
    "9C", "9D", "9H", "9S",
    "10C", "10D", "10H", "10S",
    "AC", "AD", "AH", "AS",
    "JC", "JD", "JH", "JS",
    "KC", "KD", "KH", "KS",
    "QC", "QD", "QH", "QS",
];

const CHOBITS: [&str; 9] = [
    "1A", "1B", "1C",
    "2A", "2B", "2C",
    "3A", "3B", "3C",
];

/// Registry of playable games.
///
/// ## Example
///
/// ```
/// use concentration::catalog::DeckCatalog;
///
/// let catalog = DeckCatalog::builtin();
/// let ids: Vec<_> = catalog.list_games().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["poker", "chobits"]);
///
/// let deck = catalog.deck_for("chobits").unwrap();
/// assert_eq!(deck.len(), 9);
/// assert!(catalog.deck_for("uno").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeckCatalog {
    games: Vec<(GameId, Deck)>,
    index: FxHashMap<GameId, usize>,
}

impl DeckCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The games shipped with the engine: `poker` and `chobits`.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with_game("poker", POKER)
            .with_game("chobits", CHOBITS)
    }

    /// Register a game.
    ///
    /// Panics if a game with the same id already exists.
    #[must_use]
    pub fn with_game<I, L>(mut self, id: impl Into<GameId>, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<CardLabel>,
    {
        let id = id.into();
        if self.index.contains_key(&id) {
            panic!("Game {} already registered", id);
        }
        self.index.insert(id.clone(), self.games.len());
        self.games.push((id, Deck::new(labels)));
        self
    }

    /// Game ids in registration order.
    pub fn list_games(&self) -> impl Iterator<Item = &GameId> {
        self.games.iter().map(|(id, _)| id)
    }

    /// Look up the deck of a game.
    pub fn deck_for(&self, id: impl Into<GameId>) -> Result<&Deck> {
        let id = id.into();
        match self.index.get(&id) {
            Some(&i) => Ok(&self.games[i].1),
            None => Err(GameError::UnknownGame { id }),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &GameId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
