//! Pure score computations, independent of the state machine.
//!
//! Everything here is a function of its arguments. The state machine calls
//! into this module when recording scores and building standings; the input
//! surface uses [`parse_score_entry`] to validate raw text.

use super::constants::MAX_ROUND_SCORE;
use super::entities::{Player, PlayerId, Points, Standing};

/// Clamp a raw score into `[0, MAX_ROUND_SCORE]`. Negative input is raised
/// to 0, anything above the cap comes back as the cap. Idempotent.
#[must_use]
pub fn clamp_score(value: i64) -> Points {
    value.clamp(0, i64::from(MAX_ROUND_SCORE)) as Points
}

/// Parse a raw score entry. Only pure non-negative integer strings count
/// as entered; empty or non-numeric text yields `None`. Values out of
/// range are clamped rather than rejected.
#[must_use]
pub fn parse_score_entry(text: &str) -> Option<Points> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match text.parse::<i64>() {
        Ok(value) => Some(clamp_score(value)),
        // All-digit text that overflows i64 is far past the cap anyway.
        Err(_) => Some(MAX_ROUND_SCORE),
    }
}

/// Sum of a player's recorded round scores, treating unset slots as 0.
#[must_use]
pub fn total_for(player: &Player) -> Points {
    player.scores.iter().flatten().sum()
}

/// Rank players ascending by total (lowest wins). The sort is stable, so
/// players with equal totals keep their join order.
#[must_use]
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by_key(|player| total_for(player));
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, player)| Standing {
            place: i + 1,
            id: player.id,
            name: player.name.clone(),
            total: total_for(player),
        })
        .collect()
}

/// All players sharing the minimum total. More than one entry means the
/// game ends in a shared win.
#[must_use]
pub fn game_winners(players: &[Player]) -> Vec<PlayerId> {
    let Some(best) = players.iter().map(total_for).min() else {
        return Vec::new();
    };
    players
        .iter()
        .filter(|player| total_for(player) == best)
        .map(|player| player.id)
        .collect()
}
