//! Game info shown in the status bar.

use serde::{Deserialize, Serialize};

use crate::core::GameId;

/// Snapshot of everything the info bar displays.
///
/// ```
/// use concentration::core::GameId;
/// use concentration::session::GameInfo;
///
/// let info = GameInfo {
///     title: GameId::from("poker"),
///     score: 20,
///     completed: 1,
///     total_sets: 13,
///     progress: 4,
///     total_cards: 52,
/// };
/// assert_eq!(info.progress_percent(), 8);
/// assert_eq!(
///     info.to_string(),
///     "PLAYING: POKER\nPOINTS: 20\nCOMPLETED: 1/13\nPROGRESS: 8%"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub title: GameId,
    pub score: u32,
    /// Sets completed so far.
    pub completed: u32,
    /// Sets needed to finish the game.
    pub total_sets: u32,
    /// Cards matched so far.
    pub progress: u32,
    pub total_cards: u32,
}

impl GameInfo {
    /// Matched cards as a whole percentage of the deck, rounded half up.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        if self.total_cards == 0 {
            return 0;
        }
        (f64::from(self.progress) / f64::from(self.total_cards) * 100.0).round() as u32
    }

    /// True once every set has been completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total_sets
    }
}

impl std::fmt::Display for GameInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PLAYING: {}", self.title.as_str().to_uppercase())?;
        writeln!(f, "POINTS: {}", self.score)?;
        writeln!(f, "COMPLETED: {}/{}", self.completed, self.total_sets)?;
        write!(f, "PROGRESS: {}%", self.progress_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chobits(progress: u32, completed: u32) -> GameInfo {
        GameInfo {
            title: GameId::from("chobits"),
            score: 0,
            completed,
            total_sets: 3,
            progress,
            total_cards: 9,
        }
    }

    #[test]
    fn test_progress_rounding() {
        assert_eq!(chobits(0, 0).progress_percent(), 0);
        assert_eq!(chobits(3, 1).progress_percent(), 33);
        assert_eq!(chobits(6, 2).progress_percent(), 67);
        assert_eq!(chobits(9, 3).progress_percent(), 100);
    }

    #[test]
    fn test_empty_deck_progress() {
        let mut info = chobits(0, 0);
        info.total_cards = 0;
        assert_eq!(info.progress_percent(), 0);
    }

    #[test]
    fn test_is_complete() {
        assert!(!chobits(6, 2).is_complete());
        assert!(chobits(9, 3).is_complete());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            chobits(3, 1).to_string(),
            "PLAYING: CHOBITS\nPOINTS: 0\nCOMPLETED: 1/3\nPROGRESS: 33%"
        );
    }
}
