use crate::session::SessionManager;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;

pub fn make_router(manager: &'static SessionManager) -> Router {
    Router::new()
        .route("/sessions", get(get_sessions))
        .with_state(manager)
}

pub async fn serve(manager: &'static SessionManager, port: u16) {
    let Ok(listener) = TcpListener::bind(format!("127.0.0.1:{}", port)).await else {
        log::error!("Could not bind API to port {}", port);
        return;
    };
    log::info!("API listening on port {}", port);
    if let Err(err) = axum::serve(listener, make_router(manager)).await {
        log::error!("API server stopped: {:?}", err);
    }
}

async fn get_sessions(State(manager): State<&'static SessionManager>) -> Result<Json<impl Serialize>, StatusCode> {
    let pending = manager.pending_games().await;
    let in_progress = manager.in_progress_games().await;
    Ok(Json(json!({
        "num_sessions": manager.num_games(),
        "num_pending": pending.len(),
        "num_in_progress": in_progress.len(),
        "pending": pending,
        "in_progress": in_progress
    })))
}
