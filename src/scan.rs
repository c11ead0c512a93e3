//! Card-scanner collaborator boundary.
//!
//! Recognition itself happens outside this crate: the shell photographs a
//! hand, an external service answers with card labels, and this module
//! turns those labels into a total the user can review and edit before it
//! goes through score entry like any typed value. A failed scan is a
//! transient notice in the shell and never touches session state; the
//! user just falls back to manual entry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::entities::{CardRank, CardValues, Points};

/// Errors surfaced while turning a scan into a score
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ScanError {
    #[error("no cards detected")]
    NoCardsDetected,
    #[error("unknown card label: {0}")]
    UnknownCard(String),
    #[error("scanner unavailable: {0}")]
    Unavailable(String),
}

/// A completed scan: the recognized cards and their tallied total.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub cards: Vec<CardRank>,
    pub total: Points,
}

impl ScanOutcome {
    /// Build an outcome from raw recognition labels, valuing each card
    /// with the session's card-value table.
    pub fn from_labels<S>(labels: &[S], values: &CardValues) -> Result<Self, ScanError>
    where
        S: AsRef<str>,
    {
        if labels.is_empty() {
            return Err(ScanError::NoCardsDetected);
        }
        let cards = labels
            .iter()
            .map(|label| {
                CardRank::parse(label.as_ref())
                    .ok_or_else(|| ScanError::UnknownCard(label.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total = tally(&cards, values);
        Ok(Self { cards, total })
    }
}

/// Sum a hand of recognized cards against the card-value table.
#[must_use]
pub fn tally(cards: &[CardRank], values: &CardValues) -> Points {
    cards.iter().map(|card| values.get(*card)).sum()
}
