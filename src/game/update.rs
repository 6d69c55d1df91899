use super::player::PlayerStatus;
use super::projection::CardGroups;
use super::{Game, GameStatus, SuggestionState};
use serde::Serialize;
use std::collections::BTreeMap;

/// A snapshot of the game pushed to every connected client after each change.
#[derive(Clone, Serialize, Debug)]
pub struct GameUpdate {
    pub status: GameStatus,
    pub players: Vec<PublicPlayer>,
    pub board_update: BoardUpdate,
    pub player_updates: Vec<PlayerUpdate>,
}

/// What everybody can see about a player.
#[derive(Clone, Serialize, Debug)]
pub struct PublicPlayer {
    pub name: String,
    pub suspect: String,
    pub creator: bool,
    pub location: Option<String>,
    pub status: PlayerStatus,
    pub their_turn: bool,
    pub is_curr_refuter: bool,
}

/// The shared state of the board.
#[derive(Clone, Serialize, Debug)]
pub struct BoardUpdate {
    pub turn: Option<String>,
    pub refuter: Option<String>,
    pub suggestion: SuggestionState,
    pub suggested_cards: CardGroups,
    pub refuted_card: Option<String>,
    pub weapon_locations: BTreeMap<String, String>,
    pub suspect_locations: BTreeMap<String, String>,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
    /// Only revealed once the game is over.
    pub solution: Option<CardGroups>,
}

/// The private view of a single player.
#[derive(Clone, Serialize, Debug)]
pub struct PlayerUpdate {
    pub name: String,
    pub suspect: String,
    pub location: Option<String>,
    pub hand: CardGroups,
    pub available_cards: CardGroups,
    pub reachable: Vec<String>,
    pub their_turn: bool,
    pub is_curr_refuter: bool,
    pub moved: bool,
    pub moved_by_suggest: bool,
    pub suggested: bool,
    pub status: PlayerStatus,
    pub lost: bool,
}

impl Game {
    pub fn get_update(&self) -> GameUpdate {
        GameUpdate {
            status: self.status,
            players: self.get_public_players(),
            board_update: self.get_board_update(),
            player_updates: (0..self.num_players())
                .map(|idx| self.get_player_update(idx))
                .collect(),
        }
    }

    fn get_public_players(&self) -> Vec<PublicPlayer> {
        self.players
            .iter()
            .enumerate()
            .map(|(idx, player)| PublicPlayer {
                name: player.name.clone(),
                suspect: player.suspect.clone(),
                creator: player.creator,
                location: self.player_location(idx).map(str::to_string),
                status: player.status,
                their_turn: player.their_turn,
                is_curr_refuter: player.is_curr_refuter,
            })
            .collect()
    }

    fn get_board_update(&self) -> BoardUpdate {
        BoardUpdate {
            turn: self.current_turn_name().map(str::to_string),
            refuter: self.current_refuter_name().map(str::to_string),
            suggestion: self.suggestion_state(),
            suggested_cards: self.suggested_cards(),
            refuted_card: self.refuted_card().map(str::to_string),
            weapon_locations: self.weapon_locations(),
            suspect_locations: self.suspect_locations(),
            winners: self.winners().into_iter().map(str::to_string).collect(),
            losers: self.losers().into_iter().map(str::to_string).collect(),
            solution: self.game_over().then(|| self.solution_cards()),
        }
    }

    fn get_player_update(&self, idx: usize) -> PlayerUpdate {
        let player = &self.players[idx];
        PlayerUpdate {
            name: player.name.clone(),
            suspect: player.suspect.clone(),
            location: self.player_location(idx).map(str::to_string),
            hand: self.hand(idx).unwrap_or_default(),
            available_cards: self.unused_cards(),
            reachable: self
                .reachable_locations(idx)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect(),
            their_turn: player.their_turn,
            is_curr_refuter: player.is_curr_refuter,
            moved: player.moved,
            moved_by_suggest: player.moved_by_suggest,
            suggested: player.suggested,
            status: player.status,
            lost: player.lost,
        }
    }
}
