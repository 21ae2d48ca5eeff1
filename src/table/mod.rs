//! Table: the driver that connects a session to a renderer and its timers.
//!
//! A UI talks to the engine through a `Table`. It forwards clicks, asks for
//! a game, a restart or an auto-play run, and advances time. The table
//! schedules the mismatch revert and the auto-play steps on a
//! [`Timeline`] and fires them as time passes.
//!
//! Starting or restarting a game clears the timeline, so a revert or
//! auto-play step left over from the previous session never touches the
//! new one. While a mismatch is face-up, a deferred auto-play step waits
//! for the revert deadline instead of spinning on the locked session.
//!
//! ## Example
//!
//! ```
//! use concentration::catalog::DeckCatalog;
//! use concentration::core::{EngineConfig, GameRng};
//! use concentration::render::RecordingRenderer;
//! use concentration::table::Table;
//!
//! let mut table = Table::new(
//!     DeckCatalog::builtin(),
//!     EngineConfig::default(),
//!     GameRng::new(42),
//!     RecordingRenderer::new(),
//! );
//! table.start_game("chobits").unwrap();
//! table.start_auto_play().unwrap();
//! table.run_until_idle().unwrap();
//!
//! let session = table.session().unwrap();
//! assert_eq!(session.completed(), 3);
//! assert_eq!(session.progress(), 9);
//! ```

use crate::autoplay::{AutoPlayStep, AutoPlayer};
use crate::catalog::DeckCatalog;
use crate::core::{CardLabel, EngineConfig, GameId, GameRng};
use crate::error::{GameError, Result};
use crate::render::Renderer;
use crate::schedule::Timeline;
use crate::session::{SelectionSource, SessionState, TurnOutcome, TurnResolver};

/// Delayed work owned by the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    RevertMismatch,
    AutoPlayStep,
}

/// A game table: catalog, active session, renderer and timers.
pub struct Table<R: Renderer> {
    catalog: DeckCatalog,
    resolver: TurnResolver,
    rng: GameRng,
    renderer: R,
    timeline: Timeline<Task>,
    session: Option<SessionState>,
    auto_player: Option<AutoPlayer>,
    /// Latest deadline of an outstanding mismatch revert.
    revert_due: Option<u64>,
}

impl<R: Renderer> Table<R> {
    pub fn new(catalog: DeckCatalog, config: EngineConfig, rng: GameRng, renderer: R) -> Self {
        Self {
            catalog,
            resolver: TurnResolver::new(config),
            rng,
            renderer,
            timeline: Timeline::new(),
            session: None,
            auto_player: None,
            revert_due: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn catalog(&self) -> &DeckCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.resolver.config()
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.timeline.now()
    }

    #[must_use]
    pub fn is_auto_playing(&self) -> bool {
        self.auto_player.is_some()
    }

    /// True when no revert or auto-play step is outstanding.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    // === Renderer -> Core ===

    /// Start a game with a freshly shuffled deck.
    pub fn start_game(&mut self, game: impl Into<GameId>) -> Result<&SessionState> {
        let session = SessionState::start(&self.catalog, game, &mut self.rng)?;
        Ok(self.install(session))
    }

    /// Restore the current game to its starting layout.
    pub fn restart(&mut self) -> Result<&SessionState> {
        let session = self.session.as_ref().ok_or(GameError::NoActiveGame)?.restart();
        Ok(self.install(session))
    }

    /// A player clicked a tile.
    pub fn click(&mut self, card: impl Into<CardLabel>) -> Result<TurnOutcome> {
        let card = card.into();
        let session = self.session.as_mut().ok_or(GameError::NoActiveGame)?;
        let outcome =
            self.resolver
                .select_card(session, &card, SelectionSource::Player, &mut self.renderer)?;
        self.schedule_revert(&outcome);
        Ok(outcome)
    }

    /// Start playing the remaining cards automatically.
    ///
    /// Controls are disabled for the whole run. The first card is selected
    /// right away, later ones every `auto_play_step_ms`. Starting while a
    /// run is already in progress does nothing.
    pub fn start_auto_play(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(GameError::NoActiveGame)?;
        if self.auto_player.is_some() {
            log::debug!("auto-play already running");
            return Ok(());
        }

        let player = AutoPlayer::new(session);
        log::info!("auto-play started on {} ({} cards)", session.title(), player.remaining());
        self.auto_player = Some(player);
        self.renderer.disable_controls();
        self.step_auto_play()
    }

    // === Time ===

    /// Advance the clock by `ms`, firing every timer that comes due.
    pub fn advance_by(&mut self, ms: u64) -> Result<()> {
        let until = self.timeline.now().saturating_add(ms);
        while let Some((_, task)) = self.timeline.pop_due(until) {
            self.fire(task)?;
        }
        self.timeline.advance_to(until);
        Ok(())
    }

    /// Fire timers until none are left.
    pub fn run_until_idle(&mut self) -> Result<()> {
        while let Some(deadline) = self.timeline.next_deadline() {
            if let Some((_, task)) = self.timeline.pop_due(deadline) {
                self.fire(task)?;
            }
        }
        Ok(())
    }

    // === Internals ===

    fn install(&mut self, session: SessionState) -> &SessionState {
        if !self.timeline.is_idle() {
            log::trace!("dropping {} timers from the replaced session", self.timeline.len());
        }
        self.timeline.clear();
        self.revert_due = None;
        self.auto_player = None;
        self.renderer.enable_controls();
        self.renderer.refresh_info(&session.info());
        self.session.insert(session)
    }

    fn schedule(&mut self, delay_ms: u64, task: Task) {
        self.timeline.schedule_in(delay_ms, task);
    }

    fn schedule_revert(&mut self, outcome: &TurnOutcome) {
        if let TurnOutcome::Mismatch { revert_after_ms, .. } = outcome {
            let due = self.timeline.now().saturating_add(*revert_after_ms);
            self.revert_due = Some(self.revert_due.map_or(due, |d| d.max(due)));
            self.schedule(*revert_after_ms, Task::RevertMismatch);
        }
    }

    /// Delay before retrying a deferred auto-play step.
    ///
    /// The retry lands no earlier than the outstanding revert, which was
    /// scheduled first and so fires first on a tie. Never zero.
    fn deferred_delay(&self) -> u64 {
        let step_ms = self.resolver.config().auto_play_step_ms;
        let until_revert = self
            .revert_due
            .map_or(0, |due| due.saturating_sub(self.timeline.now()));
        step_ms.max(until_revert).max(1)
    }

    fn fire(&mut self, task: Task) -> Result<()> {
        match task {
            Task::RevertMismatch => {
                if self.revert_due.is_some_and(|due| due <= self.timeline.now()) {
                    self.revert_due = None;
                }
                if let Some(session) = self.session.as_mut() {
                    self.resolver.resolve_mismatch(session, &mut self.renderer);
                }
                Ok(())
            }
            Task::AutoPlayStep => self.step_auto_play(),
        }
    }

    fn step_auto_play(&mut self) -> Result<()> {
        let (Some(session), Some(player)) = (self.session.as_mut(), self.auto_player.as_mut())
        else {
            return Ok(());
        };

        let step = player.advance(&self.resolver, session, &mut self.renderer)?;
        let step_ms = self.resolver.config().auto_play_step_ms;
        match step {
            AutoPlayStep::Selected { outcome, .. } => {
                self.schedule_revert(&outcome);
                self.schedule(step_ms, Task::AutoPlayStep);
            }
            AutoPlayStep::Deferred => {
                let delay = self.deferred_delay();
                log::trace!("auto-play deferred for {}ms", delay);
                self.schedule(delay, Task::AutoPlayStep);
            }
            AutoPlayStep::Finished => {
                self.auto_player = None;
                self.renderer.enable_controls();
                log::info!("auto-play finished");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, RenderEffect};

    fn table() -> Table<RecordingRenderer> {
        Table::new(
            DeckCatalog::builtin(),
            EngineConfig::default(),
            GameRng::new(42),
            RecordingRenderer::new(),
        )
    }

    #[test]
    fn test_requires_game() {
        let mut t = table();
        assert_eq!(t.click("1A").unwrap_err(), GameError::NoActiveGame);
        assert_eq!(t.restart().unwrap_err(), GameError::NoActiveGame);
        assert_eq!(t.start_auto_play().unwrap_err(), GameError::NoActiveGame);
    }

    #[test]
    fn test_start_refreshes_info() {
        let mut t = table();
        t.start_game("chobits").unwrap();

        let info = t.renderer().last_info().unwrap();
        assert_eq!(info.total_sets, 3);
        assert_eq!(info.score, 0);
        assert!(t.renderer().controls_enabled());
    }

    #[test]
    fn test_revert_fires_after_delay() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        t.click("1A").unwrap();
        t.click("2A").unwrap();

        t.advance_by(999).unwrap();
        assert!(t.session().unwrap().is_locked());

        t.advance_by(1).unwrap();
        let s = t.session().unwrap();
        assert!(!s.is_locked());
        assert!(s.pending().is_empty());
        assert_eq!(t.now(), 1000);
    }

    #[test]
    fn test_auto_play_disables_then_enables_controls() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        t.start_auto_play().unwrap();

        assert!(t.is_auto_playing());
        assert!(!t.renderer().controls_enabled());

        t.run_until_idle().unwrap();
        assert!(!t.is_auto_playing());
        assert!(t.renderer().controls_enabled());
        // 9 selections, one step every 200ms after the first.
        assert_eq!(t.now(), 9 * 200);
    }

    #[test]
    fn test_stale_revert_dropped_after_restart() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        for c in ["1A", "1B", "1C"] {
            t.click(c).unwrap();
        }
        t.click("2A").unwrap();
        t.click("3A").unwrap();

        t.restart().unwrap();
        t.renderer_mut().drain();
        t.run_until_idle().unwrap();

        assert!(t.renderer().effects().is_empty());
        assert!(!t.session().unwrap().is_locked());
    }

    #[test]
    fn test_restart_clears_timers() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        t.click("1A").unwrap();
        t.click("2A").unwrap();
        t.start_auto_play().unwrap();
        assert!(!t.is_idle());

        t.restart().unwrap();
        assert!(t.is_idle());
        assert_eq!(t.revert_due, None);
    }

    #[test]
    fn test_deferred_step_waits_for_revert_deadline() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        t.click("3C").unwrap();
        t.start_auto_play().unwrap(); // 1A mismatches 3C at t=0

        t.advance_by(200).unwrap(); // locked: deferred
        assert_eq!(t.timeline.len(), 2);
        assert_eq!(t.timeline.next_deadline(), Some(1000));
    }

    #[test]
    fn test_zero_step_delay_terminates() {
        let config = EngineConfig::default().with_auto_play_step_ms(0);
        let mut t = Table::new(
            DeckCatalog::builtin(),
            config,
            GameRng::new(42),
            RecordingRenderer::new(),
        );
        t.start_game("chobits").unwrap();
        t.click("3C").unwrap();
        t.start_auto_play().unwrap();
        t.run_until_idle().unwrap();

        let s = t.session().unwrap();
        assert_eq!(s.completed(), 3);
        assert_eq!(s.score(), 60);
        assert_eq!(t.now(), 1000);
        assert!(!t.is_auto_playing());
    }

    #[test]
    fn test_zero_delays_terminate() {
        let config = EngineConfig::default()
            .with_auto_play_step_ms(0)
            .with_revert_delay_ms(0);
        let mut t = Table::new(
            DeckCatalog::builtin(),
            config,
            GameRng::new(42),
            RecordingRenderer::new(),
        );
        t.start_game("chobits").unwrap();
        t.click("3C").unwrap();
        t.start_auto_play().unwrap();
        t.run_until_idle().unwrap();

        assert_eq!(t.session().unwrap().completed(), 3);
        assert_eq!(t.now(), 0);
    }

    #[test]
    fn test_unknown_game_keeps_current_session() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        assert!(t.start_game("mahjong").is_err());
        assert_eq!(t.session().unwrap().title(), &GameId::from("chobits"));
    }

    #[test]
    fn test_auto_play_twice_is_noop() {
        let mut t = table();
        t.start_game("chobits").unwrap();
        t.start_auto_play().unwrap();
        t.start_auto_play().unwrap();

        let disables = t
            .renderer()
            .effects()
            .iter()
            .filter(|e| **e == RenderEffect::DisableControls)
            .count();
        assert_eq!(disables, 1);
    }
}
