use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game] or [Session].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game does not exist")]
    GameNotFound,
    #[error("no player exists with the given name")]
    PlayerNotFound,
    #[error("no card exists with the given name")]
    CardNotFound,
    #[error("no location exists with the given name")]
    LocationNotFound,
    #[error("cannot deal cards in a game with no players")]
    NoPlayers,
    #[error("the game has already started")]
    GameNotPending,
    #[error("the game is not in progress")]
    GameNotInProgress,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("that suspect is already taken by another player")]
    SuspectTaken,
    #[error("too many players in the game")]
    TooManyPlayers,
    #[error("the game is busy, try again")]
    SessionBusy,
    #[error("the game session is unusable after a failed update")]
    SessionPoisoned,
}

/// The broad category of a [GameError].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced game, player, card or location does not exist.
    NotFound,
    /// The operation was attempted in the wrong game status.
    Prerequisite,
    /// The game is full.
    Capacity,
    /// The per-game lock could not be acquired.
    Concurrency,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            GameNotFound | PlayerNotFound | CardNotFound | LocationNotFound => ErrorKind::NotFound,
            NoPlayers | GameNotPending | GameNotInProgress | InvalidAction | SuspectTaken => {
                ErrorKind::Prerequisite
            }
            TooManyPlayers => ErrorKind::Capacity,
            SessionBusy | SessionPoisoned => ErrorKind::Concurrency,
        }
    }
}
