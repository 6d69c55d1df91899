use super::deck::CardCategory;
use super::player::PlayerStatus;
use super::Game;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The consequence of an accusation for the accusing player.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum StatusChange {
    Won,
    Lost,
}

impl FromStr for StatusChange {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "won" => Ok(StatusChange::Won),
            "lost" => Ok(StatusChange::Lost),
            _ => Err(GameError::InvalidAction),
        }
    }
}

impl Game {
    /// Records the outcome of a player's accusation. `None` does nothing.
    ///
    /// A winning player ends the game on the spot. A losing player is out of contention,
    /// and both they and the suspect they portray go back to that suspect's start space.
    pub fn apply_status_change(&mut self, player: usize, status: Option<StatusChange>) -> Result<(), GameError> {
        self.check_player_index(player)?;
        let Some(status) = status else {
            return Ok(());
        };
        self.require_in_progress()?;

        match status {
            StatusChange::Won => {
                self.players[player].status = PlayerStatus::Won;
                self.complete();
            }
            StatusChange::Lost => self.eliminate(player),
        }
        Ok(())
    }

    /// Checks a claimed solution against the hidden one.
    pub fn check_accusation(&self, suspect: &str, weapon: &str, room: &str) -> bool {
        let matches = |category, name: &str| {
            self.deck
                .solution_card(category)
                .map(|card| card.name == name)
                .unwrap_or(false)
        };
        matches(CardCategory::Suspect, suspect)
            && matches(CardCategory::Weapon, weapon)
            && matches(CardCategory::Room, room)
    }

    /// Called when a player makes an accusation. Returns whether it was correct.
    pub fn accuse(&mut self, player: usize, suspect: &str, weapon: &str, room: &str) -> Result<bool, GameError> {
        self.check_player_index(player)?;
        self.require_in_progress()?;
        if !self.players[player].is_active() {
            return Err(GameError::InvalidAction);
        }
        let correct = self.check_accusation(suspect, weapon, room);
        let status = if correct { StatusChange::Won } else { StatusChange::Lost };
        self.apply_status_change(player, Some(status))?;
        Ok(correct)
    }

    /// Called once an eliminated player has seen that they lost.
    pub fn acknowledge_elimination(&mut self, player: usize) -> Result<(), GameError> {
        self.check_player_index(player)?;
        let player = &mut self.players[player];
        if player.status != PlayerStatus::Lost {
            return Err(GameError::InvalidAction);
        }
        player.lost = true;
        Ok(())
    }

    fn eliminate(&mut self, idx: usize) {
        let start = self.board.start_space(&self.players[idx].suspect);
        let player = &mut self.players[idx];
        player.status = PlayerStatus::Lost;
        player.location = start;
        player.moved_by_suggest = false;
        let was_refuter = player.is_curr_refuter;

        let suspect = player.suspect.clone();
        if let Some(token) = self.suspects.iter_mut().find(|t| t.name == suspect) {
            token.location = start;
        }

        if self.num_players_active() == 0 {
            self.complete();
        } else if was_refuter && !self.hand_refutation_on(idx) {
            self.unrefuted = true;
        }
    }
}
