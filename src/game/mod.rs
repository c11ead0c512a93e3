//! Carioca scorekeeping engine - core FSM and game logic.
//!
//! This module provides the foundational scorekeeping implementation including:
//! - Type-safe finite state machine with 5 session phases
//! - Roster management and setup-time configuration
//! - Round progression, score recording, and standings
//! - Event generation and session views

// Submodules
pub mod constants;
pub mod entities;
pub mod functional;
pub mod states;

mod state_machine;

pub use state_machine::{
    Game, GameData, GameEvent, GameStateManagement, ScoreState, UserActions, UserError,
};
