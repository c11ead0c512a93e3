//! # Carioca
//!
//! A scorekeeping engine for the card game Carioca, built around a
//! type-safe finite state machine (FSM) design.
//!
//! This library owns the round-progression and score-aggregation logic of
//! a scorekeeping session: the roster, the configured rounds, per-round
//! winners and scores, standings, and game completion. A UI shell drives
//! it with discrete user actions and renders the snapshots it produces;
//! the shell also owns everything this crate deliberately does not
//! (rendering, capture, the recognition service behind the card scanner).
//!
//! ## Architecture
//!
//! A session moves through 5 phases, each a distinct state type:
//!
//! - **Setup**: collecting players, choosing rounds, tuning card values
//! - **WinnerSelection**: picking who melded first (or skipping an
//!   escala round nobody won)
//! - **ScoreEntry**: collecting a score from every non-winning player
//! - **Standings**: totals after the round; waiting to advance
//! - **Finished**: final standings; only a new game leaves it
//!
//! Actions validate and queue a transition; [`ScoreState::step`] performs
//! it. The FSM dispatches shared traits with `enum_dispatch` for
//! zero-cost dispatch.
//!
//! ## Example
//!
//! ```
//! use carioca::{GameStateManagement, ScoreState, UserActions};
//!
//! let mut state = ScoreState::new();
//! let ana = state.add_player("Ana").unwrap();
//! state.add_player("Beto").unwrap();
//! state.init_start().unwrap();
//! let mut state = state.step();
//!
//! state.select_winner(ana).unwrap();
//! let state = state.step();
//! println!("{}", state.phase());
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameStateManagement, ScoreState, UserActions, UserError,
    constants::{self, MAX_ROUND_SCORE, MIN_PLAYERS},
    entities::{self, GameSettings, GameView, Phase, PlayerId},
    functional,
};

/// Card-scanner collaborator boundary.
pub mod scan;
pub use scan::{ScanError, ScanOutcome};
