//! Card labels, group keys and game identifiers.
//!
//! A card is addressed by its label. The first character of a label is its
//! [`GroupKey`]: every card sharing that key must be revealed together to
//! complete a set. The rest of the label only tells cards apart.
//!
//! ```
//! use concentration::core::{CardLabel, GroupKey};
//!
//! let ten = CardLabel::new("10H");
//! assert_eq!(ten.group_key(), GroupKey('1'));
//! assert_eq!(ten.as_str(), "10H");
//! ```

use serde::{Deserialize, Serialize};

/// Identity of the set a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(pub char);

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// Label of a single card, unique within its deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardLabel(String);

impl CardLabel {
    /// Create a label.
    ///
    /// Panics on an empty label, which would have no group key.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        assert!(!label.is_empty(), "Card label must not be empty");
        Self(label)
    }

    /// The group this card belongs to (its leading character).
    #[must_use]
    pub fn group_key(&self) -> GroupKey {
        // Non-empty by construction.
        GroupKey(self.0.chars().next().unwrap_or_default())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl PartialEq<str> for CardLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CardLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Key of a game in the deck catalog (e.g. `poker`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&GameId> for GameId {
    fn from(id: &GameId) -> Self {
        id.clone()
    }
}

impl PartialEq<&str> for GameId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
