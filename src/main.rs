use crate::config::ServerConfig;
use crate::session::SessionManager;
use crate::store::SledStore;
use crate::ws::accept_connection;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use tokio::net::TcpListener;

mod api;
mod client;
mod config;
mod error;
mod game;
mod pg;
mod session;
mod store;
mod ws;

// FIXME: Implement TLS support

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => return log::error!("Invalid configuration: {}", err),
    };

    let store = match SledStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => return log::error!("Could not open database {}: {:?}", config.db_path, err),
    };
    let manager = match SessionManager::new(Arc::new(store.clone())) {
        Ok(manager) => manager,
        Err(err) => return log::error!("Could not restore games: {:?}", err),
    };
    let manager: &'static SessionManager = Box::leak(Box::new(manager));

    tokio::spawn(pg::sync_game_stats(store.archive_tree()));
    if let Some(port) = config.api_port {
        tokio::spawn(api::serve(manager, port));
    }

    let (ttl, interval) = (config.session_ttl, config.reap_interval);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            manager.reap_games(ttl).await;
        }
    });

    let addr = SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), config.port);
    let Ok(listener) = TcpListener::bind(addr).await else {
        log::error!("Could not bind to address: {:?}", addr);
        return;
    };
    log::info!("Listening on: {:?}", addr);

    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(accept_connection(stream, manager));
    }
}
