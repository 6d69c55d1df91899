use super::board::{ROOMS, SUSPECTS, WEAPONS};
use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum CardCategory {
    Weapon,
    Suspect,
    Room,
}

impl CardCategory {
    pub const ALL: [CardCategory; 3] = [CardCategory::Weapon, CardCategory::Suspect, CardCategory::Room];
}

impl ToString for CardCategory {
    fn to_string(&self) -> String {
        match self {
            CardCategory::Weapon => "Weapon",
            CardCategory::Suspect => "Suspect",
            CardCategory::Room => "Room",
        }
        .to_string()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Card {
    pub name: String,
    pub category: CardCategory,
    /// The player holding this card; `None` while in the deck or when part of the solution.
    pub owner: Option<usize>,
    pub solution: bool,
    /// Set on the card currently shown as refutation evidence.
    pub used: bool,
    /// Set on cards named by the current suggestion.
    pub suggested: bool,
}

impl Card {
    fn new(name: &str, category: CardCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            owner: None,
            solution: false,
            used: false,
            suggested: false,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the full deck, with one card per weapon, suspect and room, owned by nobody.
    pub fn new() -> Self {
        let weapons = WEAPONS.iter().map(|n| Card::new(n, CardCategory::Weapon));
        let suspects = SUSPECTS.iter().map(|n| Card::new(n, CardCategory::Suspect));
        let rooms = ROOMS.iter().map(|n| Card::new(n, CardCategory::Room));
        Self {
            cards: weapons.chain(suspects).chain(rooms).collect(),
        }
    }

    /// Picks one card of each category, uniformly and independently, as the hidden solution.
    pub fn select_solution(&mut self, rng: &mut impl Rng) {
        for card in self.cards.iter_mut() {
            card.solution = false;
        }
        for category in CardCategory::ALL {
            let candidates = self
                .cards
                .iter()
                .enumerate()
                .filter(|(_, c)| c.category == category)
                .map(|(idx, _)| idx)
                .collect::<Vec<_>>();
            if let Some(idx) = candidates.choose(rng) {
                let card = &mut self.cards[*idx];
                card.solution = true;
                card.owner = None;
            }
        }
    }

    /// Shuffles the non-solution cards and deals them out as evenly as possible.
    /// The first `n mod p` players receive one extra card.
    pub fn deal_hands(&mut self, num_players: usize, rng: &mut impl Rng) -> Result<(), GameError> {
        if num_players == 0 {
            return Err(GameError::NoPlayers);
        }

        let mut pile = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.solution)
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();
        pile.shuffle(rng);

        let base = pile.len() / num_players;
        let extra = pile.len() % num_players;
        let mut pile = pile.into_iter();
        for player in 0..num_players {
            let count = if player < extra { base + 1 } else { base };
            for idx in pile.by_ref().take(count) {
                self.cards[idx].owner = Some(player);
            }
        }

        Ok(())
    }

    /// Finds the card with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.name == name)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// The three solution cards.
    pub fn solution(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.solution)
    }

    /// The solution card of the given category, if one has been selected.
    pub fn solution_card(&self, category: CardCategory) -> Option<&Card> {
        self.solution().find(|c| c.category == category)
    }

    /// The cards held by the given player.
    pub fn hand(&self, player: usize) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.owner == Some(player))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
