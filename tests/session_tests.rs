//! Session engine integration tests.
//!
//! These tests drive the public API the way a renderer would:
//! start a game, select cards, resolve mismatches, restart.

use std::collections::HashSet;

use concentration::catalog::DeckCatalog;
use concentration::core::{CardLabel, GameRng, GroupKey};
use concentration::render::{NullRenderer, RecordingRenderer, RenderEffect};
use concentration::session::{SelectionSource, SessionState, TurnOutcome, TurnResolver};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn start(game: &str, seed: u64) -> SessionState {
    init_logging();
    SessionState::start(&DeckCatalog::builtin(), game, &mut GameRng::new(seed)).unwrap()
}

fn click(resolver: &TurnResolver, session: &mut SessionState, card: &str) -> TurnOutcome {
    resolver
        .select_card(session, &CardLabel::from(card), SelectionSource::Player, &mut NullRenderer)
        .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

/// Three cards of one chobits group complete a set.
#[test]
fn test_chobits_set() {
    let resolver = TurnResolver::default();
    let mut s = start("chobits", 42);

    let outcomes: Vec<_> = ["1A", "1B", "1C"]
        .iter()
        .map(|c| click(&resolver, &mut s, c))
        .collect();

    assert_eq!(outcomes[0], TurnOutcome::Pending);
    assert_eq!(outcomes[1], TurnOutcome::Pending);
    assert!(matches!(outcomes[2], TurnOutcome::Matched { ref removed } if removed.len() == 3));
    assert_eq!(s.score(), 20);
    assert_eq!(s.completed(), 1);
    assert_eq!(s.progress(), 3);
}

/// Two poker cards of different ranks mismatch; the revert never goes below zero.
#[test]
fn test_poker_mismatch_from_zero() {
    let resolver = TurnResolver::default();
    let mut s = start("poker", 7);

    click(&resolver, &mut s, "7H");
    let outcome = click(&resolver, &mut s, "QS");
    assert_eq!(
        outcome,
        TurnOutcome::Mismatch {
            revert_after_ms: 1000,
            to_revert: vec!["7H".into(), "QS".into()],
        }
    );

    resolver.resolve_mismatch(&mut s, &mut NullRenderer);
    assert_eq!(s.score(), 0);
    assert!(s.pending().is_empty());
    assert!(!s.is_locked());
}

/// A full poker rank scores, then a mismatch costs one point.
#[test]
fn test_poker_mismatch_after_set() {
    let resolver = TurnResolver::default();
    let mut s = start("poker", 7);

    for c in ["10C", "10D", "10H", "10S"] {
        click(&resolver, &mut s, c);
    }
    assert_eq!((s.score(), s.completed(), s.progress()), (20, 1, 4));

    click(&resolver, &mut s, "AC");
    click(&resolver, &mut s, "AD");
    assert!(matches!(click(&resolver, &mut s, "JC"), TurnOutcome::Mismatch { .. }));
    resolver.resolve_mismatch(&mut s, &mut NullRenderer);

    assert_eq!((s.score(), s.completed(), s.progress()), (19, 1, 4));
}

/// Restart restores zeroed counters and the original tile order.
#[test]
fn test_restart_keeps_layout() {
    let resolver = TurnResolver::default();
    let mut s = start("chobits", 99);
    let layout_at_start: Vec<_> = s.layout().iter().cloned().collect();

    for c in ["3A", "3B", "3C", "1A"] {
        click(&resolver, &mut s, c);
    }
    click(&resolver, &mut s, "2A");

    let s = s.restart();
    let layout_after: Vec<_> = s.layout().iter().cloned().collect();

    assert_eq!(layout_after, layout_at_start);
    assert_eq!((s.score(), s.completed(), s.progress()), (0, 0, 0));
    assert!(!s.is_locked());
    assert!(s.pending().is_empty());
    assert_eq!(s.remaining_tiles().count(), 9);
}

/// Two sessions are fully independent.
#[test]
fn test_sessions_are_independent() {
    let resolver = TurnResolver::default();
    let mut a = start("chobits", 1);
    let b = start("chobits", 1);

    for c in ["1A", "1B", "1C"] {
        click(&resolver, &mut a, c);
    }

    assert_eq!(a.score(), 20);
    assert_eq!(b.score(), 0);
}

/// Every card of every group, revealed in a row, clears the board.
#[test]
fn test_clear_poker_board() {
    let resolver = TurnResolver::default();
    let mut s = start("poker", 3);
    let mut renderer = RecordingRenderer::new();

    let cards: Vec<_> = s.deck().labels().to_vec();
    for card in &cards {
        resolver
            .select_card(&mut s, card, SelectionSource::Player, &mut renderer)
            .unwrap();
    }

    assert!(s.is_finished());
    assert_eq!(s.completed(), 13);
    assert_eq!(s.progress(), 52);
    assert_eq!(s.score(), 13 * 20);

    let info = renderer.last_info().unwrap();
    assert!(info.is_complete());
    assert_eq!(info.progress_percent(), 100);
    assert_eq!(renderer.removed().count(), 52);
}

/// Reveal happens only for accepted selections.
#[test]
fn test_locked_click_reveals_nothing() {
    let resolver = TurnResolver::default();
    let mut s = start("chobits", 5);
    let mut renderer = RecordingRenderer::new();

    for c in ["1A", "2A", "3A"] {
        resolver
            .select_card(&mut s, &c.into(), SelectionSource::Player, &mut renderer)
            .unwrap();
    }

    assert!(!renderer.effects().contains(&RenderEffect::Reveal("3A".into())));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Shuffle returns a permutation of its input.
    #[test]
    fn prop_shuffle_is_permutation(items in prop::collection::vec(any::<u32>(), 0..80), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let mut shuffled = rng.shuffled(&items);
        let mut expected = items.clone();
        shuffled.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(shuffled, expected);
    }

    /// Random play keeps every session invariant.
    #[test]
    fn prop_random_play_invariants(
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..52, 0..300),
    ) {
        let resolver = TurnResolver::default();
        let mut s = SessionState::start(&DeckCatalog::builtin(), "poker", &mut GameRng::new(seed)).unwrap();
        let deck: Vec<_> = s.deck().labels().to_vec();

        for i in picks {
            let completed = s.completed();
            let progress = s.progress();
            let outcome = resolver
                .select_card(&mut s, &deck[i], SelectionSource::Player, &mut NullRenderer)
                .unwrap();

            match outcome {
                TurnOutcome::Mismatch { .. } => {
                    prop_assert!(s.is_locked());
                    prop_assert_eq!(s.completed(), completed);
                    prop_assert_eq!(s.progress(), progress);
                    resolver.resolve_mismatch(&mut s, &mut NullRenderer);
                    prop_assert!(s.pending().is_empty());
                }
                TurnOutcome::Matched { removed } => {
                    prop_assert_eq!(s.completed(), completed + 1);
                    prop_assert_eq!(s.progress(), progress + removed.len() as u32);
                }
                TurnOutcome::Pending | TurnOutcome::Ignored => {}
            }

            prop_assert!(s.completed() as usize <= s.deck().group_count());
            prop_assert!(s.progress() as usize <= s.deck().len());
            let unique: HashSet<_> = s.pending().iter().collect();
            prop_assert_eq!(unique.len(), s.pending().len());
        }

        for label in &deck {
            let key: GroupKey = label.group_key();
            if let Some(cached) = s.cached_group_size(key) {
                prop_assert_eq!(cached, s.deck().group_size(key));
            }
        }
    }

    /// While locked, a player click changes nothing.
    #[test]
    fn prop_locked_click_is_noop(seed in any::<u64>(), pick in 0usize..9) {
        let resolver = TurnResolver::default();
        let mut s = SessionState::start(&DeckCatalog::builtin(), "chobits", &mut GameRng::new(seed)).unwrap();
        resolver.select_card(&mut s, &"1A".into(), SelectionSource::Player, &mut NullRenderer).unwrap();
        resolver.select_card(&mut s, &"2A".into(), SelectionSource::Player, &mut NullRenderer).unwrap();

        let card = s.deck().labels()[pick].clone();
        let before = (s.score(), s.completed(), s.progress(), s.pending().to_vec(), s.is_locked());
        let outcome = resolver
            .select_card(&mut s, &card, SelectionSource::Player, &mut NullRenderer)
            .unwrap();
        let after = (s.score(), s.completed(), s.progress(), s.pending().to_vec(), s.is_locked());

        prop_assert_eq!(outcome, TurnOutcome::Ignored);
        prop_assert_eq!(before, after);
    }

    /// k same-group selections complete exactly one set worth k cards and 20 points.
    #[test]
    fn prop_group_completion(seed in any::<u64>(), rank in 0usize..13) {
        let resolver = TurnResolver::default();
        let mut s = SessionState::start(&DeckCatalog::builtin(), "poker", &mut GameRng::new(seed)).unwrap();
        let group: Vec<_> = s.deck().labels()[rank * 4..rank * 4 + 4].to_vec();

        for card in &group {
            resolver.select_card(&mut s, card, SelectionSource::Player, &mut NullRenderer).unwrap();
        }

        prop_assert_eq!(s.completed(), 1);
        prop_assert_eq!(s.progress(), 4);
        prop_assert_eq!(s.score(), 20);
    }
}
