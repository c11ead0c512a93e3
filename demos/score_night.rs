//! Score Night Example
//!
//! Walks a three-player session through two rounds end-to-end, printing
//! the events and standings a shell would render along the way.

use std::collections::HashMap;

use carioca::entities::{CardValues, GameSettings, RoundDefinition};
use carioca::scan::ScanOutcome;
use carioca::{GameStateManagement, ScoreState, UserActions};

fn print_events(state: &mut ScoreState) {
    for event in state.drain_events() {
        println!("  * {event}");
    }
}

fn main() {
    println!("=== Carioca Score Night ===\n");

    // Two quick rounds instead of the full catalog.
    let rounds = ["2 Tríos", "Escala Sucia"]
        .iter()
        .filter_map(|name| RoundDefinition::by_name(name))
        .collect();
    let settings = GameSettings::new(rounds, CardValues::default());

    let mut state = ScoreState::from(settings);
    let ana = state.add_player("Ana").unwrap();
    let beto = state.add_player("Beto").unwrap();
    let caro = state.add_player("Caro").unwrap();
    state.init_start().unwrap();
    let mut state = state.step();
    print_events(&mut state);

    // Round 1: Ana melds first, the others count their hands.
    println!("\nRound 1: {}", state.view().round.map(|r| r.name).unwrap_or_default());
    state.select_winner(ana).unwrap();
    let mut state = state.step();
    state
        .record_scores(&HashMap::from([(beto, 24), (caro, 51)]))
        .unwrap();
    let mut state = state.step();
    print_events(&mut state);

    for standing in state.view().standings {
        println!("  #{} {} - {} pts", standing.place, standing.name, standing.total);
    }
    state.next_round().unwrap();
    let mut state = state.step();

    // Round 2: nobody melds the dirty run, so the round is skipped and
    // everyone counts their hand.
    println!("\nRound 2: {}", state.view().round.map(|r| r.name).unwrap_or_default());
    state.skip_round().unwrap();
    let mut state = state.step();

    // Caro photographs her leftover cards instead of typing; the scan
    // total goes through the same entry buffer as the typed scores.
    let scan = ScanOutcome::from_labels(&["K", "Q", "Joker"], &state.settings().card_values)
        .expect("scanner labels are known ranks");
    println!("  scanned {} cards worth {} pts", scan.cards.len(), scan.total);

    let mut draft = match &state {
        ScoreState::ScoreEntry(game) => game.score_draft(),
        _ => unreachable!("skip queues score entry"),
    };
    draft.set_entry(ana, "18");
    draft.set_entry(beto, "7");
    draft.set_entry(caro, &scan.total.to_string());
    assert!(draft.is_complete());
    state.record_scores(&draft.finalize()).unwrap();
    let mut state = state.step();
    print_events(&mut state);
    state.next_round().unwrap();
    let mut state = state.step();
    print_events(&mut state);

    println!("\nFinal standings:");
    for standing in state.view().standings {
        println!("  #{} {} - {} pts", standing.place, standing.name, standing.total);
    }
}
