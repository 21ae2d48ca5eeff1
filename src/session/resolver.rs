//! Turn resolution: what happens when a card is selected.
//!
//! Selections accumulate face-up until one of three things happens:
//! - The new card belongs to a different group than the first: mismatch.
//!   The session locks until [`TurnResolver::resolve_mismatch`] runs.
//! - The pending cards make up the whole group: match. They leave the board.
//! - Neither: the card stays face-up and the turn continues.

use serde::{Deserialize, Serialize};

use super::state::SessionState;
use crate::core::{CardLabel, EngineConfig};
use crate::error::{GameError, Result};
use crate::render::Renderer;

/// Who made a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionSource {
    /// A click from the player. Blocked while the session is locked.
    Player,
    /// A step of the auto-player. Never checks the lock itself; see
    /// [`TimerPolicy`](crate::core::TimerPolicy).
    AutoPlay,
}

/// Result of a single selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Nothing happened (locked, already pending, or already removed).
    Ignored,
    /// Card is face-up, the group is not complete yet.
    Pending,
    /// The group is complete; these cards were removed.
    Matched { removed: Vec<CardLabel> },
    /// Wrong group. The caller must call `resolve_mismatch` after
    /// `revert_after_ms`; the session stays locked until then.
    Mismatch {
        revert_after_ms: u64,
        to_revert: Vec<CardLabel>,
    },
}

/// Applies selections to a session and reports effects to a renderer.
#[derive(Clone, Debug, Default)]
pub struct TurnResolver {
    config: EngineConfig,
}

impl TurnResolver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Select a card.
    ///
    /// Fails only when `card` is not part of the session's deck.
    pub fn select_card<R: Renderer>(
        &self,
        session: &mut SessionState,
        card: &CardLabel,
        source: SelectionSource,
        renderer: &mut R,
    ) -> Result<TurnOutcome> {
        if !session.deck.contains(card) {
            return Err(GameError::InvalidCardReference {
                card: card.clone(),
                game: session.title.clone(),
            });
        }

        if source == SelectionSource::Player && session.locked {
            log::debug!("{} ignored: waiting for revert", card);
            return Ok(TurnOutcome::Ignored);
        }
        if session.removed.contains(card) || session.pending.contains(card) {
            log::debug!("{} ignored: already matched or face-up", card);
            return Ok(TurnOutcome::Ignored);
        }

        renderer.reveal_card(card);
        session.pending.push(card.clone());

        let key = card.group_key();
        if session.pending.len() > 1 && session.pending[0].group_key() != key {
            session.locked = true;
            let to_revert = session.pending.to_vec();
            log::debug!(
                "{} mismatches {}, reverting {} cards in {}ms",
                card,
                session.pending[0],
                to_revert.len(),
                self.config.revert_delay_ms
            );
            return Ok(TurnOutcome::Mismatch {
                revert_after_ms: self.config.revert_delay_ms,
                to_revert,
            });
        }

        let needed = session.group_size(key);
        if session.pending.len() != needed {
            log::debug!("{} pending ({}/{})", card, session.pending.len(), needed);
            return Ok(TurnOutcome::Pending);
        }

        let removed = std::mem::take(&mut session.pending).into_vec();
        for c in &removed {
            renderer.remove_tile(c);
            session.removed.insert(c.clone());
        }
        session.score += self.config.match_points;
        session.completed += 1;
        session.progress += removed.len() as u32;
        log::info!(
            "{} completed in {} (score {}, {}/{} sets)",
            key,
            session.title,
            session.score,
            session.completed,
            session.deck.group_count()
        );
        renderer.refresh_info(&session.info());

        Ok(TurnOutcome::Matched { removed })
    }

    /// Flip the pending cards back, apply the penalty and unlock.
    ///
    /// Meant to run once `revert_after_ms` has elapsed after a mismatch.
    /// With nothing pending it still applies the penalty and unlocks.
    pub fn resolve_mismatch<R: Renderer>(&self, session: &mut SessionState, renderer: &mut R) {
        for card in &session.pending {
            renderer.revert_tile(card);
        }
        session.score = session.score.saturating_sub(self.config.mismatch_penalty);
        session.pending.clear();
        session.locked = false;
        log::debug!("mismatch reverted in {} (score {})", session.title, session.score);
        renderer.refresh_info(&session.info());
    }
}
