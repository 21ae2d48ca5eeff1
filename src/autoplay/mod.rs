//! Auto-player for unattended demonstration play.
//!
//! The auto-player walks the cards still on the board in canonical deck
//! order. Catalog decks list each group contiguously, so every group
//! completes without a mismatch.
//!
//! It is a single-step state machine: each call to [`advance_auto_play`]
//! makes at most one selection. Timing (the step delay between calls) is
//! left to whoever drives it, normally [`Table`](crate::table::Table).
//!
//! Under [`TimerPolicy::Serialized`] a card whose selection caused a
//! mismatch (a leftover face-up card from the player) is queued again, so
//! the run still clears the board. Under `Interleaved` it is consumed.
//!
//! ```
//! use concentration::autoplay::{advance_auto_play, AutoPlayer, AutoPlayStep};
//! use concentration::catalog::DeckCatalog;
//! use concentration::core::GameRng;
//! use concentration::render::NullRenderer;
//! use concentration::session::{SessionState, TurnResolver};
//!
//! let catalog = DeckCatalog::builtin();
//! let mut session = SessionState::start(&catalog, "chobits", &mut GameRng::new(1)).unwrap();
//! let resolver = TurnResolver::default();
//! let mut player = AutoPlayer::new(&session);
//!
//! while advance_auto_play(&mut player, &resolver, &mut session, &mut NullRenderer).unwrap()
//!     != AutoPlayStep::Finished
//! {}
//! assert_eq!(session.completed(), 3);
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{CardLabel, TimerPolicy};
use crate::error::Result;
use crate::render::Renderer;
use crate::session::{SelectionSource, SessionState, TurnOutcome, TurnResolver};

/// What one auto-play step did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoPlayStep {
    /// A card was selected.
    Selected { card: CardLabel, outcome: TurnOutcome },
    /// The session is locked and the policy is `Serialized`; nothing was
    /// consumed. Try again after the next step delay.
    Deferred,
    /// No cards left.
    Finished,
}

/// Remaining-cards queue of an auto-play run.
#[derive(Clone, Debug, Default)]
pub struct AutoPlayer {
    remaining: VecDeque<CardLabel>,
}

impl AutoPlayer {
    /// Queue every card still on the board, in deck order.
    #[must_use]
    pub fn new(session: &SessionState) -> Self {
        Self::from_cards(session.remaining_in_deck_order().cloned())
    }

    /// Queue an explicit sequence of cards.
    pub fn from_cards(cards: impl IntoIterator<Item = CardLabel>) -> Self {
        Self {
            remaining: cards.into_iter().collect(),
        }
    }

    /// Next card to be selected.
    #[must_use]
    pub fn peek(&self) -> Option<&CardLabel> {
        self.remaining.front()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Make at most one selection.
    pub fn advance<R: Renderer>(
        &mut self,
        resolver: &TurnResolver,
        session: &mut SessionState,
        renderer: &mut R,
    ) -> Result<AutoPlayStep> {
        if self.remaining.is_empty() {
            return Ok(AutoPlayStep::Finished);
        }

        if session.is_locked() && resolver.config().timer_policy == TimerPolicy::Serialized {
            log::trace!("auto-play waiting for revert");
            return Ok(AutoPlayStep::Deferred);
        }

        let Some(card) = self.remaining.pop_front() else {
            return Ok(AutoPlayStep::Finished);
        };
        let outcome = resolver.select_card(session, &card, SelectionSource::AutoPlay, renderer)?;
        if matches!(outcome, TurnOutcome::Mismatch { .. })
            && resolver.config().timer_policy == TimerPolicy::Serialized
        {
            // The revert flips this card back too; pick it up again afterwards.
            self.remaining.push_front(card.clone());
        }
        log::debug!("auto-play {} -> {:?} ({} left)", card, outcome, self.remaining.len());

        Ok(AutoPlayStep::Selected { card, outcome })
    }
}

/// Advance an auto-play run by one step.
pub fn advance_auto_play<R: Renderer>(
    player: &mut AutoPlayer,
    resolver: &TurnResolver,
    session: &mut SessionState,
    renderer: &mut R,
) -> Result<AutoPlayStep> {
    player.advance(resolver, session, renderer)
}
