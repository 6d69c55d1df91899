use super::deck::CardCategory;
use super::projection::{group_cards, CardGroups};
use super::Game;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Progress of the suggestion made during the current turn.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum SuggestionState {
    NoSuggestion,
    Suggested,
    Refuted,
    Unrefuted,
}

impl Game {
    /// Records the active player's suggestion of a room, weapon and suspect.
    /// Unknown card names are ignored.
    pub fn record_suggestion(&mut self, room: &str, weapon: &str, suspect: &str) -> Result<(), GameError> {
        for name in [room, weapon, suspect] {
            self.suggest_card(name)?;
        }
        Ok(())
    }

    /// Marks a single card as part of the active player's suggestion.
    /// Calls for the three categories may arrive in any order, and repeating one is harmless.
    pub fn suggest_card(&mut self, name: &str) -> Result<(), GameError> {
        self.require_in_progress()?;
        if let Some(idx) = self.deck.find(name) {
            self.deck.cards_mut()[idx].suggested = true;
        }
        if let Some(current) = self.current_player() {
            self.players[current].suggested = true;
        }
        Ok(())
    }

    /// Moves the named suspect and the suggested weapon into the suggested room.
    ///
    /// If an active player portrays the suspect they are summoned along with their token,
    /// and flagged as moved by suggestion unless they were already in the room.
    /// Returns `false` without doing anything if no room and weapon have been suggested yet.
    pub fn relocate_suggested_suspect(&mut self, suspect: &str) -> Result<bool, GameError> {
        self.require_in_progress()?;

        let room = self.first_suggested(CardCategory::Room);
        let weapon = self.first_suggested(CardCategory::Weapon);
        let (Some(room), Some(weapon)) = (room, weapon) else {
            return Ok(false);
        };
        let location = self.board.find(&room).ok_or(GameError::LocationNotFound)?;

        if let Some(token) = self.suspects.iter_mut().find(|t| t.name == suspect) {
            token.location = Some(location);
        }
        if let Some(token) = self.weapons.iter_mut().find(|t| t.name == weapon) {
            token.location = Some(location);
        }
        if let Some(player) = self
            .players
            .iter_mut()
            .find(|p| p.suspect == suspect && p.is_active())
        {
            if player.location != Some(location) {
                player.location = Some(location);
                player.moved_by_suggest = true;
            }
        }

        Ok(true)
    }

    /// Shows the named card as the refutation of the current suggestion.
    ///
    /// Any earlier evidence is cleared and the suggestion is closed. Unknown names are
    /// ignored; who shows the card, and whether they hold it, is not checked.
    pub fn refute_suggestion(&mut self, name: &str) -> Result<(), GameError> {
        self.require_in_progress()?;
        let Some(idx) = self.deck.find(name) else {
            return Ok(());
        };
        for card in self.deck.cards_mut() {
            card.used = false;
            card.suggested = false;
        }
        self.deck.cards_mut()[idx].used = true;
        self.unrefuted = false;
        Ok(())
    }

    /// The cards named by the current suggestion, grouped by category.
    pub fn suggested_cards(&self) -> CardGroups {
        group_cards(self.deck.cards().iter().filter(|c| c.suggested))
    }

    /// The card shown to refute the current suggestion, if there is one.
    pub fn refuted_card(&self) -> Option<&str> {
        self.deck
            .cards()
            .iter()
            .find(|c| c.used)
            .map(|c| &c.name[..])
    }

    pub fn suggestion_state(&self) -> SuggestionState {
        if self.refuted_card().is_some() {
            return SuggestionState::Refuted;
        }
        if self.unrefuted {
            return SuggestionState::Unrefuted;
        }
        let suggested = self.deck.cards().iter().any(|c| c.suggested)
            || self.players.iter().any(|p| p.their_turn && p.suggested);
        if suggested {
            SuggestionState::Suggested
        } else {
            SuggestionState::NoSuggestion
        }
    }

    /// Clears the evidence and suggestion flags at the end of a turn.
    pub(super) fn clear_suggestion(&mut self) {
        for card in self.deck.cards_mut() {
            card.used = false;
            card.suggested = false;
        }
        self.unrefuted = false;
    }

    fn first_suggested(&self, category: CardCategory) -> Option<String> {
        self.deck
            .cards()
            .iter()
            .find(|c| c.suggested && c.category == category)
            .map(|c| c.name.clone())
    }
}
