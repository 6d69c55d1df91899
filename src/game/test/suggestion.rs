//! Suggestion, relocation and refutation tests

use super::test_utils::*;
use crate::error::GameError;
use crate::game::deck::CardCategory;
use crate::game::{Game, SuggestionState};

/// A card of the given category that some player holds.
fn dealt_card(game: &Game, category: CardCategory) -> String {
    game.deck
        .cards()
        .iter()
        .find(|c| c.category == category && !c.solution)
        .unwrap()
        .name
        .clone()
}

#[test]
fn suggestion_order_does_not_matter() {
    let names = ["Lounge", "Wrench", "Mrs. Peacock"];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    let results = orders.map(|order| {
        let mut game = create_started_game(3, 0);
        for idx in order {
            game.suggest_card(names[idx]).unwrap();
        }
        game.suggested_cards()
    });

    let suggested = &results[0];
    assert_eq!(suggested[&CardCategory::Room], vec!["Lounge"]);
    assert_eq!(suggested[&CardCategory::Weapon], vec!["Wrench"]);
    assert_eq!(suggested[&CardCategory::Suspect], vec!["Mrs. Peacock"]);
    assert!(results.iter().all(|r| r == suggested));
}

#[test]
fn repeated_suggestions_are_harmless() {
    let mut game = create_started_game(3, 0);
    game.record_suggestion("Hall", "Rope", "Mr. Green").unwrap();
    let first = game.suggested_cards();
    game.record_suggestion("Hall", "Rope", "Mr. Green").unwrap();
    assert_eq!(game.suggested_cards(), first);
    assert_eq!(game.deck.cards().iter().filter(|c| c.suggested).count(), 3);
}

#[test]
fn unknown_cards_are_ignored() {
    let mut game = create_started_game(3, 0);
    game.suggest_card("Banana").unwrap();

    assert!(game.suggested_cards().is_empty());
    assert!(game.players[turn_holder(&game)].suggested);
    assert_eq!(game.suggestion_state(), SuggestionState::Suggested);
}

#[test]
fn cannot_suggest_before_the_game_starts() {
    let mut game = create_pending_game(3);
    assert_eq!(game.suggest_card("Hall"), Err(GameError::GameNotInProgress));
    assert!(game.deck.cards().iter().all(|c| !c.suggested));
}

#[test]
fn refuting_shows_a_single_card() {
    let mut game = create_started_game(4, 21);
    let weapon = dealt_card(&game, CardCategory::Weapon);
    let room = dealt_card(&game, CardCategory::Room);
    game.record_suggestion(&room, &weapon, "Mrs. White").unwrap();

    game.refute_suggestion(&weapon).unwrap();
    assert_eq!(game.refuted_card(), Some(weapon.as_str()));
    assert_eq!(game.suggestion_state(), SuggestionState::Refuted);
    assert!(game.suggested_cards().is_empty());

    // A later refutation replaces the earlier one
    game.refute_suggestion(&room).unwrap();
    assert_eq!(game.refuted_card(), Some(room.as_str()));
    assert_eq!(game.deck.cards().iter().filter(|c| c.used).count(), 1);
}

#[test]
fn refuting_with_an_unknown_card_does_nothing() {
    let mut game = create_started_game(3, 0);
    game.record_suggestion("Hall", "Rope", "Mr. Green").unwrap();
    game.refute_suggestion("Banana").unwrap();

    assert_eq!(game.refuted_card(), None);
    assert_eq!(game.suggested_cards().len(), 3);
    assert_eq!(game.suggestion_state(), SuggestionState::Suggested);
}

#[test]
fn any_known_card_can_refute() {
    let mut game = create_started_game(3, 17);
    let (suspect, weapon, room) = solution(&game);
    game.record_suggestion(&room, &weapon, &suspect).unwrap();

    // Solution cards are not owned by anyone, but refutation does not check ownership
    game.refute_suggestion(&weapon).unwrap();
    assert_eq!(game.refuted_card(), Some(weapon.as_str()));
    assert!(game.suggested_cards().is_empty());
    assert_eq!(game.suggestion_state(), SuggestionState::Refuted);

    game.advance_turn().unwrap();
    assert_eq!(game.refuted_card(), None);
    assert!(game.deck.cards().iter().all(|c| !c.used));
    assert_eq!(game.deck.solution().count(), 3);
}

#[test]
fn refuting_ends_an_unrefuted_run() {
    let mut game = create_started_game(2, 3);
    let card = dealt_card(&game, CardCategory::Suspect);
    game.record_suggestion("Study", "Candlestick", &card).unwrap();
    game.pass_refutation().unwrap();
    assert_eq!(game.suggestion_state(), SuggestionState::Unrefuted);

    game.refute_suggestion(&card).unwrap();
    assert_eq!(game.suggestion_state(), SuggestionState::Refuted);
}

#[test]
fn suggestion_state_resets_each_turn() {
    let mut game = create_started_game(3, 8);
    let card = dealt_card(&game, CardCategory::Room);
    assert_eq!(game.suggestion_state(), SuggestionState::NoSuggestion);

    game.record_suggestion(&card, "Knife", "Miss Scarlet").unwrap();
    assert_eq!(game.suggestion_state(), SuggestionState::Suggested);
    game.refute_suggestion(&card).unwrap();
    assert_eq!(game.suggestion_state(), SuggestionState::Refuted);

    game.advance_turn().unwrap();
    assert_eq!(game.suggestion_state(), SuggestionState::NoSuggestion);
    assert_eq!(game.refuted_card(), None);
}

#[test]
fn relocation_needs_a_room_and_weapon() {
    let mut game = create_started_game(3, 0);
    let before = game.suspect_locations();

    assert_eq!(game.relocate_suggested_suspect("Mrs. White"), Ok(false));
    game.suggest_card("Ballroom").unwrap();
    assert_eq!(game.relocate_suggested_suspect("Mrs. White"), Ok(false));
    assert_eq!(game.suspect_locations(), before);

    game.suggest_card("Lead Pipe").unwrap();
    assert_eq!(game.relocate_suggested_suspect("Mrs. White"), Ok(true));
    assert_eq!(game.suspect_locations()["Mrs. White"], "Ballroom");
}

#[test]
fn relocation_summons_the_portraying_player() {
    let mut game = create_started_game(3, 4);
    let current = turn_holder(&game);
    let summoned = (0..3).find(|p| *p != current).unwrap();
    let suspect = game.players[summoned].suspect.clone();

    game.record_suggestion("Conservatory", "Revolver", &suspect).unwrap();
    game.relocate_suggested_suspect(&suspect).unwrap();

    assert_eq!(game.player_location(summoned), Some("Conservatory"));
    assert!(game.players[summoned].moved_by_suggest);
    assert_eq!(game.suspect_locations()[&suspect], "Conservatory");
    assert_eq!(game.weapon_locations()["Revolver"], "Conservatory");
    assert!(!game.players[current].moved_by_suggest);
}

#[test]
fn relocation_within_the_same_room_is_not_a_summons() {
    let mut game = create_started_game(3, 4);
    let current = turn_holder(&game);
    let other = (0..3).find(|p| *p != current).unwrap();
    let suspect = game.players[other].suspect.clone();
    game.move_player(other, "Kitchen").unwrap();

    game.record_suggestion("Kitchen", "Rope", &suspect).unwrap();
    game.relocate_suggested_suspect(&suspect).unwrap();
    assert_eq!(game.player_location(other), Some("Kitchen"));
    assert!(!game.players[other].moved_by_suggest);
}

#[test]
fn relocation_leaves_eliminated_players_alone() {
    let mut game = create_started_game(3, 4);
    let current = turn_holder(&game);
    let other = (0..3).find(|p| *p != current).unwrap();
    let suspect = game.players[other].suspect.clone();
    eliminate(&mut game, other);
    let start = game.player_location(other).map(str::to_string);

    game.record_suggestion("Hall", "Wrench", &suspect).unwrap();
    game.relocate_suggested_suspect(&suspect).unwrap();

    // The token moves, the player stays put
    assert_eq!(game.suspect_locations()[&suspect], "Hall");
    assert_eq!(game.player_location(other).map(str::to_string), start);
    assert!(!game.players[other].moved_by_suggest);
}

#[test]
fn relocating_an_unplayed_suspect_moves_only_the_token() {
    let mut game = create_started_game(2, 0);
    assert!(game.players.iter().all(|p| p.suspect != "Professor Plum"));

    game.record_suggestion("Library", "Candlestick", "Professor Plum").unwrap();
    game.relocate_suggested_suspect("Professor Plum").unwrap();
    assert_eq!(game.suspect_locations()["Professor Plum"], "Library");
    assert_eq!(game.weapon_locations()["Candlestick"], "Library");
    assert!(game.players.iter().all(|p| !p.moved_by_suggest));
}
