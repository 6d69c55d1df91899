//! Accusation and elimination tests

use super::test_utils::*;
use crate::error::GameError;
use crate::game::board::SUSPECTS;
use crate::game::player::PlayerStatus;
use crate::game::{GameStatus, StatusChange, SuggestionState};

#[test]
fn losing_sends_player_and_suspect_home() {
    let mut game = create_started_game(3, 10);
    let player = portrayer(&game, SUSPECTS[1]);
    game.move_player(player, "Billiard Room").unwrap();
    game.players[player].moved_by_suggest = true;

    game.apply_status_change(player, Some(StatusChange::Lost)).unwrap();

    let home = game.board.start_space(SUSPECTS[1]);
    assert_eq!(game.players[player].status, PlayerStatus::Lost);
    assert_eq!(game.players[player].location, home);
    assert!(!game.players[player].moved_by_suggest);
    assert_eq!(game.suspects[1].location, home);
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn winning_ends_the_game() {
    let mut game = create_started_game(4, 10);
    let player = turn_holder(&game);

    game.apply_status_change(player, Some(StatusChange::Won)).unwrap();
    assert_eq!(game.status(), GameStatus::Completed);
    assert!(game.game_over());
    assert_eq!(game.players[player].status, PlayerStatus::Won);
    assert_eq!(game.current_refuter(), None);
    assert_eq!(game.advance_turn(), Err(GameError::GameNotInProgress));
}

#[test]
fn no_status_change_does_nothing() {
    let mut game = create_started_game(3, 10);
    game.apply_status_change(0, None).unwrap();
    assert!(game.players.iter().all(|p| p.status == PlayerStatus::Active));
    assert_eq!(game.status(), GameStatus::InProgress);

    assert_eq!(game.apply_status_change(9, None), Err(GameError::PlayerNotFound));
}

#[test]
fn status_changes_parse_case_insensitively() {
    assert_eq!("won".parse::<StatusChange>(), Ok(StatusChange::Won));
    assert_eq!("LOST".parse::<StatusChange>(), Ok(StatusChange::Lost));
    assert_eq!("draw".parse::<StatusChange>(), Err(GameError::InvalidAction));
}

#[test]
fn correct_accusation_wins() {
    let mut game = create_started_game(3, 13);
    let (suspect, weapon, room) = solution(&game);
    let player = turn_holder(&game);

    assert!(game.check_accusation(&suspect, &weapon, &room));
    assert_eq!(game.accuse(player, &suspect, &weapon, &room), Ok(true));
    assert_eq!(game.status(), GameStatus::Completed);
    assert_eq!(game.winners(), vec![game.players[player].name.as_str()]);
}

#[test]
fn wrong_accusation_loses() {
    let mut game = create_started_game(3, 13);
    let (suspect, weapon, answer) = solution(&game);
    let room = game
        .board
        .rooms()
        .map(|id| game.board.name(id).to_string())
        .find(|name| *name != answer)
        .unwrap();
    let player = turn_holder(&game);

    assert!(!game.check_accusation(&suspect, &weapon, &room));
    assert_eq!(game.accuse(player, &suspect, &weapon, &room), Ok(false));
    assert_eq!(game.players[player].status, PlayerStatus::Lost);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.losers(), vec![game.players[player].name.as_str()]);
}

#[test]
fn eliminated_players_cannot_accuse_again() {
    let mut game = create_started_game(3, 13);
    let (suspect, weapon, room) = solution(&game);
    eliminate(&mut game, 2);

    assert_eq!(game.accuse(2, &suspect, &weapon, &room), Err(GameError::InvalidAction));
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn cannot_accuse_before_the_game_starts() {
    let mut game = create_pending_game(3);
    assert_eq!(
        game.accuse(0, "Mr. Green", "Rope", "Hall"),
        Err(GameError::GameNotInProgress)
    );
}

#[test]
fn acknowledging_an_elimination() {
    let mut game = create_started_game(3, 1);
    assert_eq!(game.acknowledge_elimination(0), Err(GameError::InvalidAction));

    eliminate(&mut game, 0);
    assert!(!game.players[0].lost);
    game.acknowledge_elimination(0).unwrap();
    assert!(game.players[0].lost);
}

#[test]
fn eliminating_the_last_refuter_leaves_the_suggestion_unrefuted() {
    let mut game = create_started_game(2, 5);
    let current = turn_holder(&game);
    let refuter = game.current_refuter().unwrap();
    game.record_suggestion("Hall", "Knife", "Mrs. Peacock").unwrap();

    eliminate(&mut game, refuter);
    assert_eq!(game.current_refuter(), None);
    assert_eq!(game.current_player(), Some(current));
    assert_eq!(game.suggestion_state(), SuggestionState::Unrefuted);
}
