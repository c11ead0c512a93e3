//! Scorekeeping state machine for a game of Carioca.
//!
//! The machine owns the roster, the active round sequence, and every
//! recorded outcome. User actions are fallible mutations that validate
//! their preconditions and queue at most one pending transition; `step`
//! consumes the state and performs whatever transition is queued. The
//! driving shell calls an action, then steps, then renders the new view.

use enum_dispatch::enum_dispatch;
use log::error;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, VecDeque},
    fmt,
};
use thiserror::Error;

use super::constants::MIN_PLAYERS;
use super::entities::{
    CardRank, GameSettings, GameView, Phase, Player, PlayerId, PlayerName, PlayerView, Points,
    RoundChoice, RoundDefinition, RoundOutcome, ScoreDraft,
};
use super::functional;
use super::states::{Finished, PhaseState, ScoreEntry, Setup, Standings, WinnerSelection};

/// Errors that can occur during user operations
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum UserError {
    #[error("round can't be skipped")]
    CannotSkipRound,
    #[error("player name can't be empty")]
    EmptyPlayerName,
    #[error("game already starting")]
    GameAlreadyStarting,
    #[error("missing score for {0}")]
    IncompleteScores(PlayerName),
    #[error("invalid action")]
    InvalidAction,
    #[error("invalid game state: internal consistency error")]
    InternalStateError,
    #[error("need 1+ active rounds")]
    NoActiveRounds,
    #[error("need 2+ players")]
    NotEnoughPlayers,
    #[error("player already exists")]
    PlayerAlreadyExists,
    #[error("player does not exist")]
    PlayerDoesNotExist,
    #[error("round does not exist")]
    RoundDoesNotExist,
}

/// Events that occur as the session progresses
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    PlayerJoined(PlayerName),
    PlayerRemoved(PlayerName),
    GameStarted(usize),
    RoundWon(String, PlayerName),
    RoundSkipped(String),
    ScoresRecorded(String),
    RoundAdvanced(String),
    GameFinished(Vec<PlayerName>),
    NewGameQueue,
    NewGame,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PlayerJoined(name) => format!("{name} joined the table"),
            Self::PlayerRemoved(name) => format!("{name} removed from the game"),
            Self::GameStarted(rounds) => format!("game started with {rounds} rounds"),
            Self::RoundWon(round, winner) => format!("{winner} won {round}"),
            Self::RoundSkipped(round) => format!("{round} skipped, nobody melded"),
            Self::ScoresRecorded(round) => format!("scores recorded for {round}"),
            Self::RoundAdvanced(round) => format!("next round: {round}"),
            Self::GameFinished(winners) => match winners.as_slice() {
                [winner] => format!("game over, {winner} wins"),
                winners => {
                    let names = winners
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("game over, {names} tie the win")
                }
            },
            Self::NewGameQueue => "a new game will start".to_string(),
            Self::NewGame => "new game, scores cleared".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Mutable session data shared across all phases
#[derive(Debug)]
pub struct GameData {
    pub players: Vec<Player>,
    /// Index into the active rounds of the round currently being played.
    /// 0-based, only ever moves forward.
    pub round_idx: usize,
    pub outcomes: Vec<RoundOutcome>,
    /// Stack of game events that give more insight as to what kind of
    /// session updates occur due to user actions or phase changes.
    pub(super) events: VecDeque<GameEvent>,
    /// Set when a user asks for a new game mid-session; the reset happens
    /// on the next step so the current phase value is consumed cleanly.
    pub(super) new_game_queued: bool,
    pub(super) settings: GameSettings,
}

impl Default for GameData {
    fn default() -> Self {
        GameSettings::default().into()
    }
}

impl GameData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.players.iter().any(|player| player.id == id)
    }

    #[must_use]
    pub fn player_name(&self, id: PlayerId) -> Option<&PlayerName> {
        self.players
            .iter()
            .find(|player| player.id == id)
            .map(|player| &player.name)
    }

    /// The round currently being played. `None` only if the round index
    /// ran past the active rounds, which the transitions never allow.
    #[must_use]
    pub fn current_round(&self) -> Option<&RoundDefinition> {
        self.settings.active_rounds.get(self.round_idx)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        log::debug!("{event}");
        self.events.push_back(event);
    }
}

impl From<GameSettings> for GameData {
    fn from(value: GameSettings) -> Self {
        Self {
            players: Vec::new(),
            round_idx: 0,
            outcomes: Vec::new(),
            events: VecDeque::new(),
            new_game_queued: false,
            settings: value,
        }
    }
}

/// Trait for session queries available in every phase
#[enum_dispatch]
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    #[must_use]
    fn phase(&self) -> Phase;

    fn contains_player(&self, id: PlayerId) -> bool;

    fn players(&self) -> &[Player];

    fn settings(&self) -> &GameSettings;

    /// Snapshot of the whole session for rendering.
    ///
    /// # Important
    /// This function's return value should be used - ignoring it wastes computation
    #[must_use]
    fn view(&self) -> GameView;
}

/// Trait for user actions. Every action is phase-gated: the default
/// implementation rejects it, and each phase overrides exactly the
/// actions it allows, so an action invoked in the wrong phase fails
/// without touching session state.
#[enum_dispatch]
pub trait UserActions {
    fn add_player(&mut self, _name: &str) -> Result<PlayerId, UserError> {
        Err(UserError::InvalidAction)
    }

    fn remove_player(&mut self, _id: PlayerId) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn toggle_round(&mut self, _name: &str) -> Result<bool, UserError> {
        Err(UserError::InvalidAction)
    }

    fn set_card_value(&mut self, _rank: CardRank, _points: Points) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn init_start(&mut self) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn select_winner(&mut self, _id: PlayerId) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn skip_round(&mut self) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn record_scores(&mut self, _scores: &HashMap<PlayerId, Points>) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn next_round(&mut self) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }

    fn init_new_game(&mut self) -> Result<(), UserError> {
        Err(UserError::InvalidAction)
    }
}

/// A scorekeeping session with data and logic for running a game of
/// Carioca end-to-end.
///
/// This struct wraps session data and the current phase value.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

impl<T> Game<T> {
    fn queue_new_game(&mut self) -> Result<(), UserError> {
        if !self.data.new_game_queued {
            self.data.new_game_queued = true;
            self.data.push_event(GameEvent::NewGameQueue);
        }
        Ok(())
    }

    /// Abandon the session: scores, outcomes, and the round index go,
    /// the roster stays and can be edited again in setup.
    fn reset(mut self) -> Game<Setup> {
        for player in &mut self.data.players {
            player.reset();
        }
        self.data.outcomes.clear();
        self.data.round_idx = 0;
        self.data.new_game_queued = false;
        self.data.push_event(GameEvent::NewGame);
        Game {
            data: self.data,
            state: Setup::new(),
        }
    }
}

impl<T: PhaseState> GameStateManagement for Game<T> {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.data.events)
    }

    fn phase(&self) -> Phase {
        T::PHASE
    }

    fn contains_player(&self, id: PlayerId) -> bool {
        self.data.contains_player(id)
    }

    fn players(&self) -> &[Player] {
        &self.data.players
    }

    fn settings(&self) -> &GameSettings {
        &self.data.settings
    }

    fn view(&self) -> GameView {
        let players = self
            .data
            .players
            .iter()
            .map(|player| PlayerView {
                id: player.id,
                name: player.name.clone(),
                scores: player.scores.clone(),
                total: functional::total_for(player),
            })
            .collect();
        let round = match T::PHASE {
            Phase::Setup | Phase::Finished => None,
            _ => self.data.current_round().cloned(),
        };
        GameView {
            phase: T::PHASE,
            round_idx: self.data.round_idx,
            round,
            players,
            outcomes: self.data.outcomes.clone(),
            standings: functional::standings(&self.data.players),
            leaders: functional::game_winners(&self.data.players),
        }
    }
}

impl Default for Game<Setup> {
    fn default() -> Self {
        Self {
            data: GameData::default(),
            state: Setup::new(),
        }
    }
}

impl UserActions for Game<Setup> {
    fn add_player(&mut self, name: &str) -> Result<PlayerId, UserError> {
        if self.state.start_game {
            return Err(UserError::GameAlreadyStarting);
        }
        let name = PlayerName::new(name);
        if name.is_empty() {
            return Err(UserError::EmptyPlayerName);
        }
        if self.data.players.iter().any(|player| player.name == name) {
            return Err(UserError::PlayerAlreadyExists);
        }
        let player = Player::new(name.clone());
        let id = player.id;
        self.data.players.push(player);
        self.data.push_event(GameEvent::PlayerJoined(name));
        Ok(id)
    }

    fn remove_player(&mut self, id: PlayerId) -> Result<(), UserError> {
        if self.state.start_game {
            return Err(UserError::GameAlreadyStarting);
        }
        let idx = self
            .data
            .players
            .iter()
            .position(|player| player.id == id)
            .ok_or(UserError::PlayerDoesNotExist)?;
        let player = self.data.players.remove(idx);
        self.data.push_event(GameEvent::PlayerRemoved(player.name));
        Ok(())
    }

    fn toggle_round(&mut self, name: &str) -> Result<bool, UserError> {
        if self.state.start_game {
            return Err(UserError::GameAlreadyStarting);
        }
        if RoundDefinition::by_name(name).is_none() {
            return Err(UserError::RoundDoesNotExist);
        }
        let was_active = self
            .data
            .settings
            .active_rounds
            .iter()
            .any(|round| round.name == name);
        let mut keep: Vec<String> = self
            .data
            .settings
            .active_rounds
            .iter()
            .map(|round| round.name.clone())
            .collect();
        if was_active {
            keep.retain(|kept| kept != name);
        } else {
            keep.push(name.to_string());
        }
        // Rebuild from the catalog so the active set always keeps
        // catalog order no matter the toggle order.
        self.data.settings.active_rounds = RoundDefinition::catalog()
            .into_iter()
            .filter(|round| keep.contains(&round.name))
            .collect();
        Ok(!was_active)
    }

    fn set_card_value(&mut self, rank: CardRank, points: Points) -> Result<(), UserError> {
        if self.state.start_game {
            return Err(UserError::GameAlreadyStarting);
        }
        self.data.settings.card_values.set(rank, points);
        Ok(())
    }

    fn init_start(&mut self) -> Result<(), UserError> {
        if self.state.start_game {
            return Err(UserError::GameAlreadyStarting);
        }
        if self.data.players.len() < MIN_PLAYERS {
            return Err(UserError::NotEnoughPlayers);
        }
        if self.data.settings.active_rounds.is_empty() {
            return Err(UserError::NoActiveRounds);
        }
        self.state.start_game = true;
        Ok(())
    }
}

impl UserActions for Game<WinnerSelection> {
    fn select_winner(&mut self, id: PlayerId) -> Result<(), UserError> {
        if self.state.choice.is_some() || self.data.new_game_queued {
            return Err(UserError::InvalidAction);
        }
        let winner = self
            .data
            .player_name(id)
            .cloned()
            .ok_or(UserError::PlayerDoesNotExist)?;
        let round = match self.data.current_round() {
            Some(round) => round.name.clone(),
            None => {
                error!("round index {} has no active round", self.data.round_idx);
                return Err(UserError::InternalStateError);
            }
        };
        self.state.choice = Some(RoundChoice::Winner(id));
        self.data.push_event(GameEvent::RoundWon(round, winner));
        Ok(())
    }

    fn skip_round(&mut self) -> Result<(), UserError> {
        if self.state.choice.is_some() || self.data.new_game_queued {
            return Err(UserError::InvalidAction);
        }
        let round = match self.data.current_round() {
            Some(round) => round,
            None => {
                error!("round index {} has no active round", self.data.round_idx);
                return Err(UserError::InternalStateError);
            }
        };
        if !round.skip_eligible {
            return Err(UserError::CannotSkipRound);
        }
        let name = round.name.clone();
        self.state.choice = Some(RoundChoice::Skipped);
        self.data.push_event(GameEvent::RoundSkipped(name));
        Ok(())
    }

    fn init_new_game(&mut self) -> Result<(), UserError> {
        self.queue_new_game()
    }
}

impl Game<ScoreEntry> {
    /// The winner picked for the round being scored, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.state.choice {
            RoundChoice::Winner(id) => Some(id),
            RoundChoice::Skipped => None,
        }
    }

    /// Fresh entry buffer covering exactly the players that owe a score:
    /// everyone but the winner, or everyone when the round was skipped.
    #[must_use]
    pub fn score_draft(&self) -> ScoreDraft {
        let winner = self.winner();
        ScoreDraft::new(
            self.data
                .players
                .iter()
                .map(|player| player.id)
                .filter(|id| Some(*id) != winner)
                .collect(),
        )
    }
}

impl UserActions for Game<ScoreEntry> {
    fn record_scores(&mut self, scores: &HashMap<PlayerId, Points>) -> Result<(), UserError> {
        if self.state.recorded || self.data.new_game_queued {
            return Err(UserError::InvalidAction);
        }
        for id in scores.keys() {
            if !self.data.contains_player(*id) {
                return Err(UserError::PlayerDoesNotExist);
            }
        }
        let round = match self.data.current_round() {
            Some(round) => round.clone(),
            None => {
                error!("round index {} has no active round", self.data.round_idx);
                return Err(UserError::InternalStateError);
            }
        };
        let winner = self.winner();

        let mut recorded = HashMap::with_capacity(self.data.players.len());
        for player in &self.data.players {
            let points = if Some(player.id) == winner {
                // The winner melded everything; their supplied score, if
                // any, is ignored.
                0
            } else {
                match scores.get(&player.id) {
                    Some(&value) => {
                        let clamped = functional::clamp_score(i64::from(value));
                        if clamped != value {
                            log::warn!("score {value} for {} clamped to {clamped}", player.name);
                        }
                        clamped
                    }
                    None => return Err(UserError::IncompleteScores(player.name.clone())),
                }
            };
            recorded.insert(player.id, points);
        }

        for player in &mut self.data.players {
            let points = recorded.get(&player.id).copied().unwrap_or_default();
            player.scores.push(Some(points));
        }
        self.data.outcomes.push(RoundOutcome {
            round: round.clone(),
            winner,
            scores: recorded,
        });
        self.data.push_event(GameEvent::ScoresRecorded(round.name));
        self.state.recorded = true;
        Ok(())
    }

    fn init_new_game(&mut self) -> Result<(), UserError> {
        self.queue_new_game()
    }
}

impl UserActions for Game<Standings> {
    fn next_round(&mut self) -> Result<(), UserError> {
        if self.state.advance || self.data.new_game_queued {
            return Err(UserError::InvalidAction);
        }
        self.state.advance = true;
        Ok(())
    }

    fn init_new_game(&mut self) -> Result<(), UserError> {
        self.queue_new_game()
    }
}

impl UserActions for Game<Finished> {
    fn init_new_game(&mut self) -> Result<(), UserError> {
        self.queue_new_game()
    }
}

impl From<Game<Setup>> for Game<WinnerSelection> {
    fn from(mut value: Game<Setup>) -> Self {
        value.data.round_idx = 0;
        let rounds = value.data.settings.active_rounds.len();
        value.data.push_event(GameEvent::GameStarted(rounds));
        Self {
            data: value.data,
            state: WinnerSelection { choice: None },
        }
    }
}

impl From<Game<WinnerSelection>> for Game<ScoreEntry> {
    fn from(value: Game<WinnerSelection>) -> Self {
        // Only constructed once a choice is queued; a missing choice is
        // treated as a skip so every player still owes a score.
        let choice = value.state.choice.unwrap_or(RoundChoice::Skipped);
        Self {
            data: value.data,
            state: ScoreEntry {
                choice,
                recorded: false,
            },
        }
    }
}

impl From<Game<ScoreEntry>> for Game<Standings> {
    fn from(value: Game<ScoreEntry>) -> Self {
        Self {
            data: value.data,
            state: Standings { advance: false },
        }
    }
}

impl From<Game<Standings>> for Game<WinnerSelection> {
    fn from(mut value: Game<Standings>) -> Self {
        value.data.round_idx += 1;
        if let Some(name) = value.data.current_round().map(|round| round.name.clone()) {
            value.data.push_event(GameEvent::RoundAdvanced(name));
        }
        Self {
            data: value.data,
            state: WinnerSelection { choice: None },
        }
    }
}

impl From<Game<Standings>> for Game<Finished> {
    fn from(mut value: Game<Standings>) -> Self {
        let winners = functional::game_winners(&value.data.players);
        let names = value
            .data
            .players
            .iter()
            .filter(|player| winners.contains(&player.id))
            .map(|player| player.name.clone())
            .collect();
        value.data.push_event(GameEvent::GameFinished(names));
        Self {
            data: value.data,
            state: Finished {},
        }
    }
}

impl Game<Setup> {
    #[must_use]
    pub fn step(self) -> ScoreState {
        if self.state.start_game {
            ScoreState::WinnerSelection(self.into())
        } else {
            ScoreState::Setup(self)
        }
    }
}

impl Game<WinnerSelection> {
    #[must_use]
    pub fn step(self) -> ScoreState {
        if self.data.new_game_queued {
            ScoreState::Setup(self.reset())
        } else if self.state.choice.is_some() {
            ScoreState::ScoreEntry(self.into())
        } else {
            ScoreState::WinnerSelection(self)
        }
    }
}

impl Game<ScoreEntry> {
    #[must_use]
    pub fn step(self) -> ScoreState {
        if self.data.new_game_queued {
            ScoreState::Setup(self.reset())
        } else if self.state.recorded {
            ScoreState::Standings(self.into())
        } else {
            ScoreState::ScoreEntry(self)
        }
    }
}

impl Game<Standings> {
    #[must_use]
    pub fn step(self) -> ScoreState {
        if self.data.new_game_queued {
            ScoreState::Setup(self.reset())
        } else if self.state.advance {
            // Monotonic and bounded: the last active round ends the game,
            // it never wraps back into winner selection.
            if self.data.round_idx + 1 >= self.data.settings.active_rounds.len() {
                ScoreState::Finished(self.into())
            } else {
                ScoreState::WinnerSelection(self.into())
            }
        } else {
            ScoreState::Standings(self)
        }
    }
}

impl Game<Finished> {
    #[must_use]
    pub fn step(self) -> ScoreState {
        if self.data.new_game_queued {
            ScoreState::Setup(self.reset())
        } else {
            ScoreState::Finished(self)
        }
    }
}

/// The scorekeeping FSM: one variant per phase.
#[enum_dispatch(GameStateManagement, UserActions)]
#[derive(Debug)]
pub enum ScoreState {
    Setup(Game<Setup>),
    WinnerSelection(Game<WinnerSelection>),
    ScoreEntry(Game<ScoreEntry>),
    Standings(Game<Standings>),
    Finished(Game<Finished>),
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GameSettings> for ScoreState {
    fn from(value: GameSettings) -> Self {
        Self::Setup(Game {
            data: value.into(),
            state: Setup::new(),
        })
    }
}

impl ScoreState {
    /// Fresh session in setup with default settings (full catalog,
    /// default card values).
    #[must_use]
    pub fn new() -> Self {
        Self::Setup(Game::default())
    }

    /// Perform the pending transition, if any. A step with nothing
    /// queued returns the same phase unchanged.
    #[must_use]
    pub fn step(self) -> Self {
        match self {
            Self::Setup(game) => game.step(),
            Self::WinnerSelection(game) => game.step(),
            Self::ScoreEntry(game) => game.step(),
            Self::Standings(game) => game.step(),
            Self::Finished(game) => game.step(),
        }
    }
}
