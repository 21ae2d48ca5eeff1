//! Rendering interface.
//!
//! The engine never draws anything itself. It tells a [`Renderer`] what
//! changed and the renderer updates tiles and the info bar. Two
//! implementations ship with the crate:
//!
//! - [`NullRenderer`]: discards every effect
//! - [`RecordingRenderer`]: keeps an ordered log, for tests and headless runs

use serde::{Deserialize, Serialize};

use crate::core::CardLabel;
use crate::session::GameInfo;

/// Effects the core asks the rendering layer to perform.
///
/// ## Implementation Notes
///
/// - Effects arrive in the order the engine produced them
/// - `remove_tile` is final for the session; removed tiles never come back
///   until a restart
/// - `refresh_info` carries a full snapshot, not a delta
pub trait Renderer {
    /// Show the face of a card.
    fn reveal_card(&mut self, card: &CardLabel);

    /// Take a matched card off the board.
    fn remove_tile(&mut self, card: &CardLabel);

    /// Turn a card face-down again after a mismatch.
    fn revert_tile(&mut self, card: &CardLabel);

    /// Redraw score, completed sets and progress.
    fn refresh_info(&mut self, info: &GameInfo);

    /// Block restart and tile input (auto-play running).
    fn disable_controls(&mut self);

    /// Re-enable restart and tile input.
    fn enable_controls(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn reveal_card(&mut self, card: &CardLabel) {
        (**self).reveal_card(card);
    }

    fn remove_tile(&mut self, card: &CardLabel) {
        (**self).remove_tile(card);
    }

    fn revert_tile(&mut self, card: &CardLabel) {
        (**self).revert_tile(card);
    }

    fn refresh_info(&mut self, info: &GameInfo) {
        (**self).refresh_info(info);
    }

    fn disable_controls(&mut self) {
        (**self).disable_controls();
    }

    fn enable_controls(&mut self) {
        (**self).enable_controls();
    }
}

/// A renderer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn reveal_card(&mut self, _card: &CardLabel) {}
    fn remove_tile(&mut self, _card: &CardLabel) {}
    fn revert_tile(&mut self, _card: &CardLabel) {}
    fn refresh_info(&mut self, _info: &GameInfo) {}
    fn disable_controls(&mut self) {}
    fn enable_controls(&mut self) {}
}

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderEffect {
    Reveal(CardLabel),
    Remove(CardLabel),
    Revert(CardLabel),
    Info(GameInfo),
    DisableControls,
    EnableControls,
}

/// A renderer that records every effect in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    effects: Vec<RenderEffect>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All effects so far, oldest first.
    #[must_use]
    pub fn effects(&self) -> &[RenderEffect] {
        &self.effects
    }

    /// Take the recorded effects, leaving the log empty.
    pub fn drain(&mut self) -> Vec<RenderEffect> {
        std::mem::take(&mut self.effects)
    }

    /// The most recent info refresh, if any.
    #[must_use]
    pub fn last_info(&self) -> Option<&GameInfo> {
        self.effects.iter().rev().find_map(|e| match e {
            RenderEffect::Info(info) => Some(info),
            _ => None,
        })
    }

    /// Cards currently removed according to the log.
    pub fn removed(&self) -> impl Iterator<Item = &CardLabel> {
        self.effects.iter().filter_map(|e| match e {
            RenderEffect::Remove(card) => Some(card),
            _ => None,
        })
    }

    /// Whether controls are enabled after replaying the log.
    /// Controls start enabled.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        self.effects
            .iter()
            .rev()
            .find_map(|e| match e {
                RenderEffect::DisableControls => Some(false),
                RenderEffect::EnableControls => Some(true),
                _ => None,
            })
            .unwrap_or(true)
    }
}

impl Renderer for RecordingRenderer {
    fn reveal_card(&mut self, card: &CardLabel) {
        self.effects.push(RenderEffect::Reveal(card.clone()));
    }

    fn remove_tile(&mut self, card: &CardLabel) {
        self.effects.push(RenderEffect::Remove(card.clone()));
    }

    fn revert_tile(&mut self, card: &CardLabel) {
        self.effects.push(RenderEffect::Revert(card.clone()));
    }

    fn refresh_info(&mut self, info: &GameInfo) {
        self.effects.push(RenderEffect::Info(info.clone()));
    }

    fn disable_controls(&mut self) {
        self.effects.push(RenderEffect::DisableControls);
    }

    fn enable_controls(&mut self) {
        self.effects.push(RenderEffect::EnableControls);
    }
}
