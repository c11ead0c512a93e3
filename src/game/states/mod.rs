//! Phase definitions for the scorekeeping FSM.
//!
//! Each phase holds only what that phase needs: pending transition flags
//! and the data the next phase is built from. Everything else lives in the
//! shared `GameData`.

use crate::game::entities::{Phase, RoundChoice};

/// Maps a phase struct to its serializable label.
pub trait PhaseState {
    const PHASE: Phase;
}

/// Setup phase - collecting players and settings before the game starts
#[derive(Debug)]
pub struct Setup {
    pub(crate) start_game: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Self::new()
    }
}

impl Setup {
    #[must_use]
    pub fn new() -> Self {
        Self { start_game: false }
    }
}

impl PhaseState for Setup {
    const PHASE: Phase = Phase::Setup;
}

/// Picking the round winner (or skipping an escala round)
#[derive(Debug)]
pub struct WinnerSelection {
    pub(crate) choice: Option<RoundChoice>,
}

impl PhaseState for WinnerSelection {
    const PHASE: Phase = Phase::WinnerSelection;
}

/// Collecting a score from every non-winning player
#[derive(Debug)]
pub struct ScoreEntry {
    pub(crate) choice: RoundChoice,
    pub(crate) recorded: bool,
}

impl PhaseState for ScoreEntry {
    const PHASE: Phase = Phase::ScoreEntry;
}

/// Showing totals after a round; waiting to advance
#[derive(Debug)]
pub struct Standings {
    pub(crate) advance: bool,
}

impl PhaseState for Standings {
    const PHASE: Phase = Phase::Standings;
}

/// Terminal phase - final standings; only a new game leaves it
#[derive(Debug)]
pub struct Finished {}

impl PhaseState for Finished {
    const PHASE: Phase = Phase::Finished;
}
