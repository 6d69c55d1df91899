use super::deck::{Card, CardCategory};
use super::player::PlayerStatus;
use super::token::Token;
use super::Game;
use crate::error::GameError;
use std::collections::BTreeMap;

/// Card names grouped by category.
pub type CardGroups = BTreeMap<CardCategory, Vec<String>>;

pub(super) fn group_cards<'a>(cards: impl Iterator<Item = &'a Card>) -> CardGroups {
    let mut groups = CardGroups::new();
    for card in cards {
        groups.entry(card.category).or_default().push(card.name.clone());
    }
    groups
}

impl Game {
    /// The cards a player holds, excluding any currently shown as evidence.
    pub fn hand(&self, player: usize) -> Result<CardGroups, GameError> {
        self.check_player_index(player)?;
        Ok(group_cards(self.deck.hand(player).filter(|c| !c.used)))
    }

    /// Every card that is neither part of the solution nor currently shown as evidence.
    pub fn unused_cards(&self) -> CardGroups {
        group_cards(self.deck.cards().iter().filter(|c| !c.used && !c.solution))
    }

    pub fn solution_cards(&self) -> CardGroups {
        group_cards(self.deck.solution())
    }

    pub fn current_turn_name(&self) -> Option<&str> {
        self.current_player().map(|p| &self.players[p].name[..])
    }

    pub fn current_refuter_name(&self) -> Option<&str> {
        self.current_refuter().map(|p| &self.players[p].name[..])
    }

    /// Where each weapon currently lies, keyed by weapon name.
    pub fn weapon_locations(&self) -> BTreeMap<String, String> {
        self.token_locations(&self.weapons)
    }

    /// Where each suspect token currently stands, keyed by suspect name.
    pub fn suspect_locations(&self) -> BTreeMap<String, String> {
        self.token_locations(&self.suspects)
    }

    /// The name of the location a player stands on.
    pub fn player_location(&self, player: usize) -> Option<&str> {
        let location = self.players.get(player)?.location?;
        Some(self.board.name(location))
    }

    /// Where every other player stands, keyed by player name.
    pub fn other_player_locations(&self, player: usize) -> BTreeMap<String, String> {
        (0..self.num_players())
            .filter(|idx| *idx != player)
            .filter_map(|idx| {
                let location = self.player_location(idx)?;
                Some((self.players[idx].name.clone(), location.to_string()))
            })
            .collect()
    }

    pub fn winners(&self) -> Vec<&str> {
        self.players_with_status(PlayerStatus::Won)
    }

    pub fn losers(&self) -> Vec<&str> {
        self.players_with_status(PlayerStatus::Lost)
    }

    fn players_with_status(&self, status: PlayerStatus) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| p.status == status)
            .map(|p| &p.name[..])
            .collect()
    }

    fn token_locations(&self, tokens: &[Token]) -> BTreeMap<String, String> {
        tokens
            .iter()
            .filter_map(|t| Some((t.name.clone(), self.board.name(t.location?).to_string())))
            .collect()
    }
}
