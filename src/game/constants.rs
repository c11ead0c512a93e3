//! Static configuration for a game of Carioca.
//!
//! Round definitions and card values are fixed data, not logic. The round
//! catalog is ordered; a game is played over a subset of it chosen during
//! setup, always kept in catalog order.

/// Minimum number of players required to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Upper bound for a single round score. A full 13-card hand of high cards
/// and jokers can't realistically exceed this.
pub const MAX_ROUND_SCORE: u32 = 240;

/// Display names longer than this are truncated on entry.
pub const MAX_PLAYER_NAME_LENGTH: usize = 32;

/// The full ten-round catalog as `(name, description)` pairs, in play order.
pub const ROUND_CATALOG: [(&str, &str); 10] = [
    ("2 Tríos", "2 grupos de 3 cartas del mismo valor"),
    (
        "1 Trío y 1 Escala",
        "1 grupo de 3 cartas iguales y 1 escala de 4 cartas",
    ),
    ("2 Escalas", "2 escaleras de 4 cartas"),
    ("3 Tríos", "3 grupos de 3 cartas del mismo valor"),
    (
        "2 Tríos y 1 Escala",
        "2 grupos de 3 cartas iguales y 1 escala de 4 cartas",
    ),
    (
        "1 Trío y 2 Escalas",
        "1 grupo de 3 cartas iguales y 2 escaleras de 4 cartas",
    ),
    ("3 Escalas", "3 escaleras de 4 cartas"),
    ("4 Tríos", "4 grupos de 3 cartas del mismo valor"),
    ("Escala Sucia", "1 escalera de 13 cartas (puede usar Jokers)"),
    ("Escala Real", "1 escalera de 13 cartas del mismo palo (sin Jokers)"),
];

/// Rounds that may end with nobody melding. The runs get hard enough that
/// no winner is a normal result, so these rounds can be skipped: no player
/// gets the automatic 0 and everyone submits a score.
pub const SKIP_ELIGIBLE_ROUNDS: [&str; 3] = ["3 Escalas", "Escala Sucia", "Escala Real"];

/// Rounds dealt with an extended 13-card hand instead of the usual 12.
pub const THIRTEEN_CARD_ROUNDS: [&str; 2] = ["Escala Sucia", "Escala Real"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_rounds() {
        assert_eq!(ROUND_CATALOG.len(), 10);
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, (name, _)) in ROUND_CATALOG.iter().enumerate() {
            for (other, _) in &ROUND_CATALOG[i + 1..] {
                assert_ne!(name, other);
            }
        }
    }

    #[test]
    fn test_skip_eligible_rounds_are_in_catalog() {
        for name in SKIP_ELIGIBLE_ROUNDS {
            assert!(ROUND_CATALOG.iter().any(|(n, _)| *n == name));
        }
    }

    #[test]
    fn test_thirteen_card_rounds_are_skip_eligible() {
        for name in THIRTEEN_CARD_ROUNDS {
            assert!(SKIP_ELIGIBLE_ROUNDS.contains(&name));
        }
    }
}
