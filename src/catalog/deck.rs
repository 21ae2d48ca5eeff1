//! Immutable deck templates.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::core::{CardLabel, GameRng, GroupKey};

/// Ordered, immutable list of card labels for one game.
///
/// Cloning is O(1); sessions share the catalog's deck and shuffle copies of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    labels: Arc<[CardLabel]>,
}

impl Deck {
    /// Build a deck from labels.
    ///
    /// Panics if a label appears twice.
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<CardLabel>,
    {
        let labels: Vec<CardLabel> = labels.into_iter().map(Into::into).collect();

        {
            let mut seen = FxHashSet::default();
            for label in &labels {
                if !seen.insert(label) {
                    panic!("Card {} appears twice in deck", label);
                }
            }
        }

        Self { labels: labels.into() }
    }

    /// Labels in canonical (catalog) order.
    #[must_use]
    pub fn labels(&self) -> &[CardLabel] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: &CardLabel) -> bool {
        self.labels.contains(card)
    }

    /// Number of cards that share `key`.
    #[must_use]
    pub fn group_size(&self, key: GroupKey) -> usize {
        self.labels.iter().filter(|l| l.group_key() == key).count()
    }

    /// Number of distinct groups, i.e. sets needed to finish the game.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.labels
            .iter()
            .map(CardLabel::group_key)
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// A shuffled copy of the labels. The deck itself is untouched.
    #[must_use]
    pub fn shuffled(&self, rng: &mut GameRng) -> Vec<CardLabel> {
        rng.shuffled(&self.labels)
    }
}
