use crate::{
    client::{Client, PlayerAction},
    error::{ErrorKind, GameError},
    session::SessionManager,
};
use futures_util::{select, FutureExt, SinkExt, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;

#[derive(Error, Debug)]
enum WsError {
    #[error("violation of the application-layer protocol")]
    ProtocolError,
    #[error("{0}")]
    GameError(#[from] GameError),
}

pub async fn accept_connection(stream: TcpStream, manager: &SessionManager) {
    log::info!("Accepted new connection");

    let Ok(stream) = tokio_tungstenite::accept_async(stream).await else {
        log::error!("Error occured during websocket handshake");
        return;
    };
    let (mut write, read) = stream.split();
    let mut read = read.fuse();

    let mut client = Client::new(manager);

    loop {
        select! {
            msg = read.try_next() => {
                let Ok(Some(Message::Text(msg))) = msg else {
                    break;
                };
                let Ok(msg) = serde_json::from_str::<Value>(&msg) else {
                    log::error!("Invalid JSON received: {}", &msg);
                    break;
                };
                let result = match parse_request(&msg) {
                    Ok(req) => process_request(req, &mut client).await,
                    Err(err) => Err(err),
                };
                let reply = match result {
                    Ok(Some(reply)) => format_reply(reply),
                    Ok(None) => continue,
                    Err(WsError::ProtocolError) => {
                        log::error!("Invalid message received: {}", &msg);
                        break;
                    }
                    Err(err) => {
                        match &err {
                            WsError::GameError(e) if e.kind() == ErrorKind::Concurrency => {
                                log::warn!("Game busy, rejected request {}: {}", &msg, e)
                            }
                            _ => log::debug!("Rejected request {}: {}", &msg, err),
                        }
                        json!({
                            "type": "error",
                            "error": err.to_string()
                        })
                    }
                };
                write.send(Message::Text(reply.to_string())).await.ok();
            },
            state = client.next_state().fuse() => {
                let reply = json!({
                    "type": "update",
                    "state": state
                });
                if write.send(Message::Text(reply.to_string())).await.is_err() {
                    log::error!("Could not send websockets message");
                    break;
                }
            }
        }
    }

    client.leave().await.ok();
}

/// A message sent by a game client to the server.
enum Request {
    CreateGame { name: String },
    JoinGame { game_id: String, name: String },
    LeaveGame,
    StartGame,
    PlayerAction(PlayerAction),
    Heartbeat,
}

/// A message sent by the server to a game client.
enum Response {
    GameCreated { game_id: String, player_id: String },
    GameJoined { game_id: String, player_id: String },
}

/// Parses a websockets message from the client.
fn parse_request(req: &Value) -> Result<Request, WsError> {
    match req["type"].as_str().unwrap_or("") {
        "create_game" => Ok(Request::CreateGame { name: parse_name(req)? }),
        "join_game" => {
            let game_id = req["gameId"]
                .as_str()
                .ok_or(WsError::ProtocolError)?
                .to_ascii_uppercase();
            Ok(Request::JoinGame { game_id, name: parse_name(req)? })
        }
        "leave_game" => Ok(Request::LeaveGame),
        "start_game" => Ok(Request::StartGame),
        "player_action" => {
            let action = serde_json::from_value(req["action"].clone()).map_err(|_| WsError::ProtocolError)?;
            Ok(Request::PlayerAction(action))
        }
        "heartbeat" => Ok(Request::Heartbeat),
        _ => Err(WsError::ProtocolError),
    }
}

fn parse_name(req: &Value) -> Result<String, WsError> {
    let name = req["name"].as_str().ok_or(WsError::ProtocolError)?.trim();
    if name.is_empty() {
        return Err(WsError::ProtocolError);
    }
    Ok(name.to_ascii_uppercase())
}

/// Processes a request from the client.
async fn process_request(req: Request, client: &mut Client<'_>) -> Result<Option<Response>, WsError> {
    match req {
        Request::CreateGame { name } => {
            let game_id = client.create_game().await?;
            client.join_game(&game_id, &name, true).await?;
            return Ok(Some(Response::GameCreated { game_id, player_id: name }));
        }
        Request::JoinGame { game_id, name } => {
            client.join_game(&game_id, &name, false).await?;
            return Ok(Some(Response::GameJoined { game_id, player_id: name }));
        }
        Request::LeaveGame => client.leave().await?,
        Request::StartGame => client.start_game().await?,
        Request::PlayerAction(action) => client.player_action(action).await?,
        Request::Heartbeat => client.heartbeat().await?,
    }
    Ok(None)
}

/// Formats a reply to the client to be sent over websockets.
fn format_reply(res: Response) -> Value {
    match res {
        Response::GameCreated { game_id, player_id } => json!({
            "type": "game_created",
            "gameId": game_id,
            "playerId": player_id
        }),
        Response::GameJoined { game_id, player_id } => json!({
            "type": "game_joined",
            "gameId": game_id,
            "playerId": player_id
        }),
    }
}
