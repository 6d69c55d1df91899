use serde::{Deserialize, Serialize};

/// A weapon or suspect piece on the board.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Token {
    pub name: String,
    /// `None` until the token is placed at game start.
    pub location: Option<usize>,
}

impl Token {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            location: None,
        }
    }
}
