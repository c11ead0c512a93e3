/// Integration tests for full scorekeeping sessions
///
/// These tests drive the state machine the way a shell would: perform an
/// action, step, render the view, repeat.
use std::collections::HashMap;

use carioca::{
    GameStateManagement, Phase, PlayerId, ScoreState, UserActions, UserError,
    entities::{CardValues, GameSettings, RoundDefinition},
};

fn rounds(names: &[&str]) -> Vec<RoundDefinition> {
    names
        .iter()
        .filter_map(|name| RoundDefinition::by_name(name))
        .collect()
}

fn started_game(players: &[&str], round_names: &[&str]) -> (ScoreState, Vec<PlayerId>) {
    let settings = GameSettings::new(rounds(round_names), CardValues::default());
    let mut state = ScoreState::from(settings);
    let ids = players
        .iter()
        .map(|name| state.add_player(name).unwrap())
        .collect();
    state.init_start().unwrap();
    (state.step(), ids)
}

/// Play out one round: pick the winner, record everyone else's scores,
/// advance past the standings screen.
fn play_round(
    state: ScoreState,
    winner: PlayerId,
    scores: &HashMap<PlayerId, u32>,
) -> ScoreState {
    let mut state = state;
    state.select_winner(winner).unwrap();
    let mut state = state.step();
    state.record_scores(scores).unwrap();
    let mut state = state.step();
    assert_eq!(state.phase(), Phase::Standings);
    state.next_round().unwrap();
    state.step()
}

#[test]
fn test_three_players_two_rounds() {
    let (mut state, ids) = started_game(&["Ana", "Beto", "Caro"], &["2 Tríos", "1 Trío y 1 Escala"]);
    let (ana, beto, caro) = (ids[0], ids[1], ids[2]);

    // Round 1: Ana melds first.
    state.select_winner(ana).unwrap();
    let mut state = state.step();
    state
        .record_scores(&HashMap::from([(beto, 15), (caro, 30)]))
        .unwrap();
    let state = state.step();

    let view = state.view();
    assert_eq!(view.round_idx, 0);
    let outcome = &view.outcomes[0];
    assert_eq!(outcome.score_for(ana), Some(0));
    assert_eq!(outcome.score_for(beto), Some(15));
    assert_eq!(outcome.score_for(caro), Some(30));

    let mut state = state;
    state.next_round().unwrap();
    let state = state.step();
    assert_eq!(state.phase(), Phase::WinnerSelection);
    assert_eq!(state.view().round_idx, 1);
    assert_eq!(state.view().round.unwrap().name, "1 Trío y 1 Escala");
}

#[test]
fn test_skipped_escala_round_has_no_winner() {
    let (mut state, ids) = started_game(&["A", "B"], &["Escala Sucia"]);

    state.skip_round().unwrap();
    let mut state = state.step();
    assert_eq!(state.phase(), Phase::ScoreEntry);

    // Neither player gets the automatic 0; both must submit.
    let err = state
        .record_scores(&HashMap::from([(ids[0], 20)]))
        .unwrap_err();
    assert!(matches!(err, UserError::IncompleteScores(_)));

    state
        .record_scores(&HashMap::from([(ids[0], 20), (ids[1], 35)]))
        .unwrap();
    let state = state.step();

    let outcome = &state.view().outcomes[0];
    assert!(outcome.is_skipped());
    assert_eq!(outcome.score_for(ids[0]), Some(20));
    assert_eq!(outcome.score_for(ids[1]), Some(35));
}

#[test]
fn test_skip_rejected_outside_escala_rounds() {
    let (mut state, _) = started_game(&["A", "B"], &["4 Tríos"]);
    assert_eq!(state.skip_round(), Err(UserError::CannotSkipRound));
    // The round is still waiting for a winner.
    assert_eq!(state.phase(), Phase::WinnerSelection);
}

#[test]
fn test_tied_totals_share_the_win() {
    let (state, ids) = started_game(&["Ana", "Beto", "Caro"], &["2 Tríos", "2 Escalas"]);
    let (ana, beto, caro) = (ids[0], ids[1], ids[2]);

    // Ana 0 + 20, Beto 20 + 0, Caro 45 + 0: Ana and Beto finish on 20.
    let state = play_round(state, ana, &HashMap::from([(beto, 20), (caro, 45)]));
    let mut state = state;
    state.select_winner(beto).unwrap();
    let mut state = state.step();
    state
        .record_scores(&HashMap::from([(ana, 20), (caro, 0)]))
        .unwrap();
    let mut state = state.step();
    state.next_round().unwrap();
    let state = state.step();

    assert_eq!(state.phase(), Phase::Finished);
    let view = state.view();
    assert_eq!(view.leaders, vec![ana, beto]);
    // Stable order: standings keep join order on ties.
    assert_eq!(view.standings[0].id, ana);
    assert_eq!(view.standings[1].id, beto);
    assert_eq!(view.standings[2].id, caro);
    assert_eq!(view.standings[2].total, 45);
}

#[test]
fn test_full_ten_round_game_finishes() {
    let all_names: Vec<&str> = carioca::constants::ROUND_CATALOG
        .iter()
        .map(|(name, _)| *name)
        .collect();
    let (mut state, ids) = started_game(&["Ana", "Beto"], &all_names);

    for round in 0..all_names.len() {
        assert_eq!(state.phase(), Phase::WinnerSelection);
        assert_eq!(state.view().round_idx, round);
        state = play_round(state, ids[0], &HashMap::from([(ids[1], 10)]));
    }

    assert_eq!(state.phase(), Phase::Finished);
    let view = state.view();
    assert_eq!(view.outcomes.len(), 10);
    assert_eq!(view.players[1].total, 100);
    assert_eq!(view.leaders, vec![ids[0]]);

    // The game never wraps back into winner selection.
    let state = state.step();
    assert_eq!(state.phase(), Phase::Finished);
}

#[test]
fn test_new_game_restarts_with_same_roster() {
    let (state, ids) = started_game(&["Ana", "Beto"], &["2 Tríos"]);
    let mut state = play_round(state, ids[0], &HashMap::from([(ids[1], 30)]));
    assert_eq!(state.phase(), Phase::Finished);

    state.init_new_game().unwrap();
    let mut state = state.step();
    assert_eq!(state.phase(), Phase::Setup);
    assert!(state.contains_player(ids[0]));
    assert!(state.contains_player(ids[1]));

    // The roster can start again right away, with clean score sheets.
    state.init_start().unwrap();
    let state = state.step();
    let view = state.view();
    assert_eq!(view.round_idx, 0);
    assert!(view.outcomes.is_empty());
    assert!(view.players.iter().all(|player| player.total == 0));
}

#[test]
fn test_view_snapshot_serializes() {
    let (mut state, ids) = started_game(&["Ana", "Beto"], &["2 Tríos"]);
    state.select_winner(ids[0]).unwrap();
    let state = state.step();

    let json = state.view().to_json().unwrap();
    assert!(json.contains("\"phase\""));
    assert!(json.contains("Ana"));
    assert!(json.contains("2 Tríos"));
}
