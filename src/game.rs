use self::board::{Board, SUSPECTS, WEAPONS};
use self::deck::Deck;
use self::player::Player;
use self::token::Token;
use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub use self::accusation::StatusChange;
pub use self::deck::CardCategory;
pub use self::projection::CardGroups;
pub use self::suggestion::SuggestionState;
pub use self::update::GameUpdate;

mod accusation;
pub mod board;
pub mod deck;
mod movement;
pub mod player;
mod projection;
mod suggestion;
mod test;
mod token;
mod turn;
pub mod update;

pub const MAX_PLAYERS: usize = 6;

/// A game of Clue-Less.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Game {
    status: GameStatus,
    board: Board,
    deck: Deck,
    players: Vec<Player>,
    weapons: Vec<Token>,
    suspects: Vec<Token>,
    /// Indices into `players`; fixed once the game starts.
    turn_order: Vec<usize>,
    /// Set when every other player has declined to refute the current suggestion.
    unrefuted: bool,
    rng: rand_chacha::ChaCha8Rng,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Pending,
    InProgress,
    Completed,
}

impl ToString for GameStatus {
    fn to_string(&self) -> String {
        match self {
            GameStatus::Pending => "PENDING",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Completed => "COMPLETED",
        }
        .to_string()
    }
}

impl Game {
    /// Creates a new, pending game with no players.
    pub fn new(seed: u64) -> Self {
        Game {
            status: GameStatus::Pending,
            board: Board::new(),
            deck: Deck::new(),
            players: vec![],
            weapons: WEAPONS.iter().map(|n| Token::new(n)).collect(),
            suspects: SUSPECTS.iter().map(|n| Token::new(n)).collect(),
            turn_order: vec![],
            unrefuted: false,
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn turn_order(&self) -> &[usize] {
        &self.turn_order
    }

    /// Gets the player names.
    pub fn player_names(&self) -> impl Iterator<Item = &'_ str> {
        self.players.iter().map(|p| &p.name[..])
    }

    /// Finds a player with the given name.
    pub fn find_player(&self, name: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .ok_or(GameError::PlayerNotFound)
    }

    /// Adds a player to a pending game, returning their index.
    /// A previous registration under the same name is replaced.
    pub fn join(&mut self, name: &str, creator: bool) -> Result<usize, GameError> {
        if self.status != GameStatus::Pending {
            return Err(GameError::GameNotPending);
        }
        if let Ok(stale) = self.find_player(name) {
            self.players.remove(stale);
        }
        if self.players.len() == MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        let suspect = SUSPECTS
            .iter()
            .find(|s| self.players.iter().all(|p| p.suspect != **s))
            .ok_or(GameError::TooManyPlayers)?;
        self.players
            .push(Player::new(name.to_string(), suspect.to_string(), creator));
        Ok(self.players.len() - 1)
    }

    /// Removes a player from a pending game.
    pub fn leave(&mut self, name: &str) -> Result<(), GameError> {
        if self.status != GameStatus::Pending {
            return Err(GameError::GameNotPending);
        }
        let idx = self.find_player(name)?;
        self.players.remove(idx);
        Ok(())
    }

    /// Lets a player in a pending game portray a different, unclaimed suspect.
    pub fn choose_suspect(&mut self, player: usize, suspect: &str) -> Result<(), GameError> {
        self.check_player_index(player)?;
        if self.status != GameStatus::Pending {
            return Err(GameError::GameNotPending);
        }
        if !SUSPECTS.contains(&suspect) {
            return Err(GameError::CardNotFound);
        }
        let taken = self
            .players
            .iter()
            .enumerate()
            .any(|(idx, p)| idx != player && p.suspect == suspect);
        if taken {
            return Err(GameError::SuspectTaken);
        }
        self.players[player].suspect = suspect.to_string();
        Ok(())
    }

    /// Starts the game: picks the solution, deals the cards, places every token
    /// and fixes a random turn order.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Pending {
            return Err(GameError::GameNotPending);
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        self.deck.select_solution(&mut self.rng);
        self.deck.deal_hands(self.players.len(), &mut self.rng)?;

        for token in self.suspects.iter_mut() {
            token.location = self.board.start_space(&token.name);
        }
        for player in self.players.iter_mut() {
            player.location = self.board.start_space(&player.suspect);
        }

        let mut rooms = self.board.rooms().collect::<Vec<_>>();
        rooms.shuffle(&mut self.rng);
        for (token, room) in self.weapons.iter_mut().zip(rooms) {
            token.location = Some(room);
        }

        let mut order = (0..self.players.len()).collect::<Vec<_>>();
        order.shuffle(&mut self.rng);
        self.players[order[0]].their_turn = true;
        self.turn_order = order;

        self.status = GameStatus::InProgress;
        self.designate_refuter();
        Ok(())
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players who are still in contention.
    pub fn num_players_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<usize> {
        self.players.iter().position(|p| p.their_turn)
    }

    /// The player designated to attempt the next refutation.
    pub fn current_refuter(&self) -> Option<usize> {
        self.players.iter().position(|p| p.is_curr_refuter)
    }

    fn complete(&mut self) {
        for player in self.players.iter_mut() {
            player.is_curr_refuter = false;
        }
        self.status = GameStatus::Completed;
    }

    fn require_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            _ => Err(GameError::GameNotInProgress),
        }
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: usize) -> Result<(), GameError> {
        if player < self.num_players() {
            Ok(())
        } else {
            Err(GameError::PlayerNotFound)
        }
    }
}
