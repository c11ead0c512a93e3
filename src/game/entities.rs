use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::HashMap,
    fmt::{self},
};
use uuid::Uuid;

use super::constants;

/// Type alias for points. Scores are whole points; there are no fractional
/// card values in Carioca.
pub type Points = u32;

/// Unique, session-stable player identifier.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        let name: String = s
            .trim()
            .chars()
            .take(constants::MAX_PLAYER_NAME_LENGTH)
            .collect();
        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// A player at the table and their per-round score slots. One slot is
/// appended per completed round; a slot is `None` until that round's
/// scores are recorded.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub scores: Vec<Option<Points>>,
}

impl Player {
    #[must_use]
    pub fn new(name: PlayerName) -> Self {
        Self {
            id: PlayerId::new(),
            name,
            scores: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.scores.clear();
    }
}

/// One entry of the round catalog. Round identity is the name; the flags
/// are derived from it once at construction so callers never compare
/// against the name lists directly.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundDefinition {
    pub name: String,
    pub description: String,
    pub skip_eligible: bool,
    pub thirteen_cards: bool,
}

impl RoundDefinition {
    fn from_catalog_entry(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            skip_eligible: constants::SKIP_ELIGIBLE_ROUNDS.contains(&name),
            thirteen_cards: constants::THIRTEEN_CARD_ROUNDS.contains(&name),
        }
    }

    /// The full ordered catalog.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        constants::ROUND_CATALOG
            .iter()
            .map(|(name, description)| Self::from_catalog_entry(name, description))
            .collect()
    }

    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        constants::ROUND_CATALOG
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, d)| Self::from_catalog_entry(n, d))
    }
}

impl fmt::Display for RoundDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Card ranks as the scanner and the help display know them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum CardRank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl CardRank {
    pub const ALL: [Self; 14] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Joker,
    ];

    /// Parse a scanner label. Labels are matched case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|rank| rank.label().eq_ignore_ascii_case(label))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Joker => "Joker",
        }
    }

    /// Default point value for the rank.
    #[must_use]
    pub const fn default_value(self) -> Points {
        match self {
            Self::Ace => 15,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Joker => 30,
        }
    }
}

impl fmt::Display for CardRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label().fmt(f)
    }
}

/// The card-value table. Used by the scanner collaborator when tallying a
/// captured hand and by the help display; score aggregation never reads it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CardValues(HashMap<CardRank, Points>);

impl Default for CardValues {
    fn default() -> Self {
        Self(
            CardRank::ALL
                .into_iter()
                .map(|rank| (rank, rank.default_value()))
                .collect(),
        )
    }
}

impl CardValues {
    #[must_use]
    pub fn get(&self, rank: CardRank) -> Points {
        self.0.get(&rank).copied().unwrap_or_default()
    }

    pub fn set(&mut self, rank: CardRank, points: Points) {
        self.0.insert(rank, points);
    }
}

/// Game configuration. Mutable during setup, frozen once the game starts
/// (the state machine only exposes mutation in the setup phase).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    pub active_rounds: Vec<RoundDefinition>,
    pub card_values: CardValues,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(RoundDefinition::catalog(), CardValues::default())
    }
}

impl GameSettings {
    #[must_use]
    pub fn new(active_rounds: Vec<RoundDefinition>, card_values: CardValues) -> Self {
        Self {
            active_rounds,
            card_values,
        }
    }
}

/// How a winner-selection phase concluded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundChoice {
    /// A player melded first and takes the automatic 0.
    Winner(PlayerId),
    /// Nobody melded; every player submits a score.
    Skipped,
}

/// A completed round: who won (if anyone) and what everybody scored.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub round: RoundDefinition,
    pub winner: Option<PlayerId>,
    pub scores: HashMap<PlayerId, Points>,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.winner.is_none()
    }

    #[must_use]
    pub fn score_for(&self, id: PlayerId) -> Option<Points> {
        self.scores.get(&id).copied()
    }
}

/// Score-entry buffer backing the input surface. Entries are raw text;
/// digits-only input is clamped into range on the way in, anything else
/// counts as "not yet entered" and blocks completion.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScoreDraft {
    required: Vec<PlayerId>,
    entries: HashMap<PlayerId, String>,
}

impl ScoreDraft {
    #[must_use]
    pub fn new(required: Vec<PlayerId>) -> Self {
        Self {
            required,
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn required(&self) -> &[PlayerId] {
        &self.required
    }

    /// Update one player's entry. Clearing the text clears the entry;
    /// digits-only text is stored clamped; anything else leaves the
    /// previous entry untouched, matching how a numeric input field
    /// rejects stray characters.
    pub fn set_entry(&mut self, id: PlayerId, text: &str) {
        if text.trim().is_empty() {
            self.entries.remove(&id);
            return;
        }
        if let Some(points) = super::functional::parse_score_entry(text) {
            self.entries.insert(id, points.to_string());
        }
    }

    #[must_use]
    pub fn entry(&self, id: PlayerId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Every required player has a pure non-negative integer entry.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.required.iter().all(|id| {
            self.entries
                .get(id)
                .is_some_and(|text| super::functional::parse_score_entry(text).is_some())
        })
    }

    /// Collapse the buffer into a per-player score map, dropping entries
    /// for players no longer required.
    #[must_use]
    pub fn finalize(&self) -> HashMap<PlayerId, Points> {
        self.required
            .iter()
            .filter_map(|id| {
                self.entries
                    .get(id)
                    .and_then(|text| super::functional::parse_score_entry(text))
                    .map(|points| (*id, points))
            })
            .collect()
    }
}

/// The five phases of a scorekeeping session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    Setup,
    WinnerSelection,
    ScoreEntry,
    Standings,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Setup => "setup",
            Self::WinnerSelection => "winner selection",
            Self::ScoreEntry => "score entry",
            Self::Standings => "standings",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// One row of the standings table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub place: usize,
    pub id: PlayerId,
    pub name: PlayerName,
    pub total: Points,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: PlayerName,
    pub scores: Vec<Option<Points>>,
    pub total: Points,
}

/// Full session snapshot for rendering the standings and score-sheet
/// views. Everything the shell needs in one serializable value.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameView {
    pub phase: Phase,
    pub round_idx: usize,
    /// The round currently being played, when one is.
    pub round: Option<RoundDefinition>,
    pub players: Vec<PlayerView>,
    pub outcomes: Vec<RoundOutcome>,
    pub standings: Vec<Standing>,
    /// Players currently sharing the lowest total. These are the game
    /// winners once the phase is `Finished`.
    pub leaders: Vec<PlayerId>,
}

impl GameView {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
