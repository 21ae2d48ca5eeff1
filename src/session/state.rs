//! Session state and its restart snapshot.
//!
//! ## SessionState
//!
//! The mutable record of one game in progress:
//! - Title, score, completed sets, progress
//! - Pending (face-up, unresolved) selections
//! - Lazily filled group-size cache
//! - Lock flag held while a mismatch revert is outstanding
//!
//! Only [`TurnResolver`](super::TurnResolver) mutates a running session.
//!
//! ## SessionSnapshot
//!
//! Immutable copy of the session as it was when the game started. Restart
//! rebuilds from it, so the tile layout survives a restart unshuffled.
//! The layout is an `im::Vector`, so snapshots clone in O(1).

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::info::GameInfo;
use crate::catalog::{Deck, DeckCatalog};
use crate::core::{CardLabel, GameId, GameRng, GroupKey};
use crate::error::Result;

/// Session as it was at `start`, restored verbatim by `restart`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub title: GameId,
    /// Canonical deck order from the catalog.
    pub deck: Deck,
    /// Shuffled tile order.
    pub layout: Vector<CardLabel>,
}

/// State of one running game.
///
/// ## Example
///
/// ```
/// use concentration::catalog::DeckCatalog;
/// use concentration::core::GameRng;
/// use concentration::session::SessionState;
///
/// let catalog = DeckCatalog::builtin();
/// let session = SessionState::start(&catalog, "chobits", &mut GameRng::new(1)).unwrap();
///
/// assert_eq!(session.score(), 0);
/// assert_eq!(session.layout().len(), 9);
/// assert!(!session.is_locked());
/// ```
#[derive(Clone, Debug)]
pub struct SessionState {
    pub(crate) title: GameId,
    pub(crate) deck: Deck,
    pub(crate) layout: Vector<CardLabel>,

    pub(crate) score: u32,
    pub(crate) completed: u32,
    pub(crate) progress: u32,

    /// Face-up cards awaiting resolution, in selection order. Never holds
    /// the same card twice.
    pub(crate) pending: SmallVec<[CardLabel; 4]>,

    /// GroupKey -> number of cards sharing it. Filled on first use.
    pub(crate) group_sizes: FxHashMap<GroupKey, usize>,

    /// Matched cards, off the board until restart.
    pub(crate) removed: FxHashSet<CardLabel>,

    pub(crate) locked: bool,

    snapshot: SessionSnapshot,
}

impl SessionState {
    /// Start a game: look up its deck, shuffle a copy, zero everything.
    pub fn start(catalog: &DeckCatalog, game: impl Into<GameId>, rng: &mut GameRng) -> Result<Self> {
        let title = game.into();
        let deck = catalog.deck_for(&title)?.clone();
        let layout: Vector<CardLabel> = deck.shuffled(rng).into_iter().collect();

        log::info!(
            "starting {} ({} cards, {} sets, seed {})",
            title,
            deck.len(),
            deck.group_count(),
            rng.seed()
        );

        Ok(Self::from_snapshot(SessionSnapshot { title, deck, layout }))
    }

    /// Build a fresh session from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            title: snapshot.title.clone(),
            deck: snapshot.deck.clone(),
            layout: snapshot.layout.clone(),
            score: 0,
            completed: 0,
            progress: 0,
            pending: SmallVec::new(),
            group_sizes: FxHashMap::default(),
            removed: FxHashSet::default(),
            locked: false,
            snapshot,
        }
    }

    /// A new session identical to this one at start time: same layout,
    /// zero score, nothing pending, unlocked.
    #[must_use]
    pub fn restart(&self) -> Self {
        log::info!("restarting {}", self.title);
        Self::from_snapshot(self.snapshot.clone())
    }

    // === Accessors ===

    #[must_use]
    pub fn title(&self) -> &GameId {
        &self.title
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Tile order on the board (shuffled), including removed tiles.
    #[must_use]
    pub fn layout(&self) -> &Vector<CardLabel> {
        &self.layout
    }

    #[must_use]
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[must_use]
    pub fn progress(&self) -> u32 {
        self.progress
    }

    #[must_use]
    pub fn pending(&self) -> &[CardLabel] {
        &self.pending
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_removed(&self, card: &CardLabel) -> bool {
        self.removed.contains(card)
    }

    /// Cached group size, if the group has been queried yet.
    #[must_use]
    pub fn cached_group_size(&self, key: GroupKey) -> Option<usize> {
        self.group_sizes.get(&key).copied()
    }

    /// Tiles still on the board, in layout order.
    pub fn remaining_tiles(&self) -> impl Iterator<Item = &CardLabel> {
        self.layout.iter().filter(move |c| !self.removed.contains(*c))
    }

    /// Cards still on the board, in canonical deck order.
    pub fn remaining_in_deck_order(&self) -> impl Iterator<Item = &CardLabel> {
        self.deck.labels().iter().filter(move |c| !self.removed.contains(*c))
    }

    /// True once every set is completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.removed.len() == self.deck.len()
    }

    /// Current info-bar contents.
    #[must_use]
    pub fn info(&self) -> GameInfo {
        GameInfo {
            title: self.title.clone(),
            score: self.score,
            completed: self.completed,
            total_sets: self.deck.group_count() as u32,
            progress: self.progress,
            total_cards: self.deck.len() as u32,
        }
    }

    // === Crate-internal mutation ===

    /// Group size for `key`, computing and caching it on first use.
    pub(crate) fn group_size(&mut self, key: GroupKey) -> usize {
        let deck = &self.deck;
        *self
            .group_sizes
            .entry(key)
            .or_insert_with(|| deck.group_size(key))
    }
}
