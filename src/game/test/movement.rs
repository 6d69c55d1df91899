//! Movement tests

use super::test_utils::*;
use crate::error::GameError;

#[test]
fn moving_carries_the_suspect_token() {
    let mut game = create_started_game(3, 2);
    let player = turn_holder(&game);
    let suspect = game.players[player].suspect.clone();

    game.move_player(player, "Hall - Lounge Hallway").unwrap();
    assert_eq!(game.player_location(player), Some("Hall - Lounge Hallway"));
    assert!(game.players[player].moved);
    assert_eq!(game.suspect_locations()[&suspect], "Hall - Lounge Hallway");
}

#[test]
fn empty_or_unknown_destinations_are_ignored() {
    let mut game = create_started_game(3, 2);
    let player = turn_holder(&game);
    let before = game.players[player].location;

    game.move_player(player, "").unwrap();
    game.move_player(player, "Attic").unwrap();
    assert_eq!(game.players[player].location, before);
    assert!(!game.players[player].moved);
}

#[test]
fn moving_needs_a_running_game() {
    let mut game = create_pending_game(2);
    assert_eq!(game.move_player(0, "Hall"), Err(GameError::GameNotInProgress));

    let mut game = create_started_game(2, 0);
    assert_eq!(game.move_player(4, "Hall"), Err(GameError::PlayerNotFound));
}

#[test]
fn start_space_leads_only_to_its_hallway() {
    let game = create_started_game(1, 0);
    assert_eq!(game.players[0].suspect, "Miss Scarlet");
    assert_eq!(game.reachable_locations(0), Ok(vec!["Hall - Lounge Hallway"]));
}

#[test]
fn rooms_reach_their_hallways_and_passages() {
    let mut game = create_started_game(1, 0);
    let study = location(&game, "Study");
    game.move_player(0, "Study").unwrap();
    assert_eq!(game.players[0].location, Some(study));

    let mut reachable = game.reachable_locations(0).unwrap();
    reachable.sort();
    assert_eq!(
        reachable,
        vec!["Kitchen", "Study - Hall Hallway", "Study - Library Hallway"]
    );
}

#[test]
fn unplaced_players_reach_nowhere() {
    let game = create_pending_game(2);
    assert_eq!(game.reachable_locations(1), Ok(vec![]));
    assert_eq!(game.reachable_locations(2), Err(GameError::PlayerNotFound));
}
