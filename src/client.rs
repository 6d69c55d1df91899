use crate::{
    error::GameError,
    game::{Game, GameStatus, GameUpdate, StatusChange},
    session::{read_session, write_session, SessionHandle, SessionManager},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::watch;

/// A single game client, bound to at most one player in one game.
pub struct Client<'a> {
    manager: &'a SessionManager,
    session: Option<SessionHandle>,
    player: Option<String>,
    game_id: Option<String>,
    updates: Option<watch::Receiver<GameUpdate>>,
}

/// An action performed by the player.
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum PlayerAction {
    ChooseSuspect { suspect: String },
    Move { location: String },
    Suggest { room: String, weapon: String, suspect: String },
    SuggestCard { name: String },
    RelocateSuspect { suspect: String },
    Refute { card: String },
    PassRefutation,
    EndTurn,
    Accuse { suspect: String, weapon: String, room: String },
    ChangeStatus { status: String },
    AcknowledgeLoss,
}

impl<'a> Client<'a> {
    /// Creates a new game client.
    pub fn new(manager: &'a SessionManager) -> Self {
        Self {
            manager,
            session: None,
            game_id: None,
            player: None,
            updates: None,
        }
    }

    /// Creates a new game session, returning its ID.
    pub async fn create_game(&mut self) -> Result<String, GameError> {
        let session = self.manager.create_game();
        let id = read_session(&session).await?.id().to_owned();
        Ok(id)
    }

    /// Joins a pending game as a player.
    pub async fn join_game(&mut self, game_id: &str, name: &str, creator: bool) -> Result<(), GameError> {
        self.leave().await?;
        let session = self.manager.join_game(game_id, name, creator).await?;
        self.player = Some(name.to_string());
        self.game_id = Some(game_id.to_string());
        self.updates = Some(write_session(&session).await?.subscribe());
        self.session = Some(session);
        Ok(())
    }

    /// Waits until there is an update to the game state, then returns the latest state.
    pub async fn next_state(&mut self) -> Value {
        let Some(updates) = &mut self.updates else {
            return std::future::pending().await;
        };

        if updates.changed().await.is_err() {
            return std::future::pending().await;
        }
        let update = updates.borrow();

        let mut state = json!(update
            .player_updates
            .iter()
            .find(|u| Some(&u.name) == self.player.as_ref()));
        state["type"] = match update.status {
            GameStatus::Pending => "lobby",
            GameStatus::InProgress => "playing",
            GameStatus::Completed => "ended",
        }
        .into();

        json!({
            "game_id": self.game_id,
            "name": self.player,
            "players": update.players,
            "board": update.board_update,
            "state": state
        })
    }

    /// Leaves the game. A player leaving a pending game gives up their seat.
    pub async fn leave(&mut self) -> Result<(), GameError> {
        if let (Some(session), Some(player)) = (&self.session, &self.player) {
            let mut session = write_session(session).await?;
            if session.game().status() == GameStatus::Pending {
                session.remove_player(player).ok();
            }
        }
        self.player = None;
        self.game_id = None;
        self.updates = None;
        self.session = None;
        Ok(())
    }

    /// Starts the game. Only the player who created it may do so.
    pub async fn start_game(&self) -> Result<(), GameError> {
        let (Some(session), Some(player)) = (&self.session, &self.player) else {
            return Err(GameError::InvalidAction);
        };
        let mut session = write_session(session).await?;
        let idx = session.game().find_player(player)?;
        if !session.game().players()[idx].creator {
            return Err(GameError::InvalidAction);
        }
        session.start_game()
    }

    /// Called when a player performs an action.
    pub async fn player_action(&self, action: PlayerAction) -> Result<(), GameError> {
        let player = self.player.as_ref().ok_or(GameError::InvalidAction)?;
        self.mutate_game(|game| {
            let player = game.find_player(player)?;
            match &action {
                PlayerAction::ChooseSuspect { suspect } => game.choose_suspect(player, suspect),
                PlayerAction::Move { location } => game.move_player(player, location),
                PlayerAction::Suggest { room, weapon, suspect } => {
                    game.record_suggestion(room, weapon, suspect)?;
                    game.relocate_suggested_suspect(suspect).map(|_| ())
                }
                PlayerAction::SuggestCard { name } => game.suggest_card(name),
                PlayerAction::RelocateSuspect { suspect } => {
                    game.relocate_suggested_suspect(suspect).map(|_| ())
                }
                PlayerAction::Refute { card } => game.refute_suggestion(card),
                PlayerAction::PassRefutation => game.pass_refutation(),
                PlayerAction::EndTurn => game.advance_turn(),
                PlayerAction::Accuse { suspect, weapon, room } => {
                    game.accuse(player, suspect, weapon, room).map(|_| ())
                }
                PlayerAction::ChangeStatus { status } => {
                    let status = match status.as_str() {
                        "" => None,
                        other => Some(other.parse::<StatusChange>()?),
                    };
                    game.apply_status_change(player, status)
                }
                PlayerAction::AcknowledgeLoss => game.acknowledge_elimination(player),
            }
        })
        .await
    }

    /// Keeps the game session alive.
    pub async fn heartbeat(&self) -> Result<(), GameError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        write_session(session).await?.heartbeat();
        Ok(())
    }

    /// Performs an action on the game.
    async fn mutate_game<F>(&self, mutation: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut Game) -> Result<(), GameError>,
    {
        let Some(session) = &self.session else {
            return Err(GameError::InvalidAction);
        };
        let mut session = write_session(session).await?;
        session.mutate_game(mutation)
    }
}
