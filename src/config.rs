use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is unspecified")]
    Missing(&'static str),
    #[error("{0} is invalid")]
    Invalid(&'static str),
}

/// Server settings, read from the environment (and `.env`, if present).
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Port the websocket server listens on.
    pub port: u16,
    /// Port for the HTTP stats API; disabled when unset.
    pub api_port: Option<u16>,
    /// Path of the sled database.
    pub db_path: String,
    /// Games idle for longer than this are reaped.
    pub session_ttl: Duration,
    /// How often the reaper runs.
    pub reap_interval: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_var("PORT")?.ok_or(ConfigError::Missing("PORT"))?,
            api_port: parse_var("API_PORT")?,
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "clueless.db".to_string()),
            session_ttl: Duration::from_secs(parse_var("SESSION_TTL_SECS")?.unwrap_or(3600)),
            reap_interval: Duration::from_secs(parse_var("REAP_INTERVAL_SECS")?.unwrap_or(60)),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(None),
    }
}
