//! Game session engine: state, lifecycle and turn resolution.
//!
//! ## Key Types
//!
//! - `SessionState`: One running game (score, progress, pending cards, lock)
//! - `SessionSnapshot`: The session at start time, used by restart
//! - `TurnResolver`: Applies selections and mismatch reverts
//! - `TurnOutcome`: What a selection did
//! - `GameInfo`: Info-bar contents handed to the renderer
//!
//! ## Example
//!
//! ```
//! use concentration::catalog::DeckCatalog;
//! use concentration::core::GameRng;
//! use concentration::render::NullRenderer;
//! use concentration::session::{SelectionSource, SessionState, TurnOutcome, TurnResolver};
//!
//! let catalog = DeckCatalog::builtin();
//! let mut session = SessionState::start(&catalog, "chobits", &mut GameRng::new(42)).unwrap();
//! let resolver = TurnResolver::default();
//! let mut renderer = NullRenderer;
//!
//! for card in ["1A", "1B"] {
//!     let outcome = resolver
//!         .select_card(&mut session, &card.into(), SelectionSource::Player, &mut renderer)
//!         .unwrap();
//!     assert_eq!(outcome, TurnOutcome::Pending);
//! }
//! let outcome = resolver
//!     .select_card(&mut session, &"1C".into(), SelectionSource::Player, &mut renderer)
//!     .unwrap();
//! assert!(matches!(outcome, TurnOutcome::Matched { .. }));
//! assert_eq!(session.score(), 20);
//! ```

mod info;
mod resolver;
mod state;

pub use info::GameInfo;
pub use resolver::{SelectionSource, TurnOutcome, TurnResolver};
pub use state::{SessionSnapshot, SessionState};
