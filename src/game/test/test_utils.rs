//! Test utilities and helper functions for game testing

use crate::game::{Game, StatusChange};

/// Creates a pending game with `num_players` players; the first one created it.
pub fn create_pending_game(num_players: usize) -> Game {
    let mut game = Game::new(42);
    for i in 0..num_players {
        game.join(&format!("PLAYER{}", i), i == 0).unwrap();
    }
    game
}

/// Creates a game that has been started with the given seed.
pub fn create_started_game(num_players: usize, seed: u64) -> Game {
    let mut game = Game::new(seed);
    for i in 0..num_players {
        game.join(&format!("PLAYER{}", i), i == 0).unwrap();
    }
    game.start().unwrap();
    game
}

/// The player whose turn it is.
pub fn turn_holder(game: &Game) -> usize {
    game.current_player().unwrap()
}

/// The index of the player portraying the given suspect.
pub fn portrayer(game: &Game, suspect: &str) -> usize {
    game.players.iter().position(|p| p.suspect == suspect).unwrap()
}

/// Marks a player as having made a wrong accusation.
pub fn eliminate(game: &mut Game, player: usize) {
    game.apply_status_change(player, Some(StatusChange::Lost)).unwrap();
}

/// Gets the ID of a named location.
pub fn location(game: &Game, name: &str) -> usize {
    game.board.find(name).unwrap()
}

/// Names of the hidden solution, as (suspect, weapon, room).
pub fn solution(game: &Game) -> (String, String, String) {
    use crate::game::CardCategory::*;
    let name = |category| game.deck.solution_card(category).unwrap().name.clone();
    (name(Suspect), name(Weapon), name(Room))
}
