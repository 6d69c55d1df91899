use serde::{Deserialize, Serialize};

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub name: String,
    pub creator: bool,
    /// The suspect this player portrays.
    pub suspect: String,
    pub location: Option<usize>,
    pub their_turn: bool,
    pub status: PlayerStatus,
    pub moved: bool,
    pub moved_by_suggest: bool,
    pub suggested: bool,
    /// Whether the player has acknowledged their elimination.
    pub lost: bool,
    pub is_curr_refuter: bool,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum PlayerStatus {
    Active,
    Won,
    Lost,
}

impl ToString for PlayerStatus {
    fn to_string(&self) -> String {
        match self {
            PlayerStatus::Active => "ACTIVE",
            PlayerStatus::Won => "WON",
            PlayerStatus::Lost => "LOST",
        }
        .to_string()
    }
}

impl Player {
    pub fn new(name: String, suspect: String, creator: bool) -> Self {
        Self {
            name,
            creator,
            suspect,
            location: None,
            their_turn: false,
            status: PlayerStatus::Active,
            moved: false,
            moved_by_suggest: false,
            suggested: false,
            lost: false,
            is_curr_refuter: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}
