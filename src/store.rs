use crate::game::Game;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// The persisted form of a game session.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredGame {
    pub game: Game,
    /// When the game was started, if it has been.
    pub started: Option<DateTime<Utc>>,
    /// Whether the finished game has been written to the archive.
    pub archived: bool,
}

/// A summary of a finished game, kept for statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub players: Vec<String>,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub outcome: Outcome,
    pub winner: Option<String>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A player made a correct accusation.
    Solved,
    /// A player won because everybody else was eliminated.
    LastStanding,
    /// Every player made a wrong accusation.
    Unsolved,
}

impl ToString for Outcome {
    fn to_string(&self) -> String {
        match self {
            Outcome::Solved => "Solved",
            Outcome::LastStanding => "LastStanding",
            Outcome::Unsolved => "Unsolved",
        }
        .to_string()
    }
}

/// Durable storage for game sessions.
pub trait GameStore: Send + Sync {
    /// Writes the latest snapshot of a game.
    fn save(&self, id: &str, game: &StoredGame) -> anyhow::Result<()>;
    /// Deletes a game snapshot.
    fn remove(&self, id: &str) -> anyhow::Result<()>;
    /// Reads back every saved game, skipping any that can no longer be decoded.
    fn load_all(&self) -> anyhow::Result<Vec<(String, StoredGame)>>;
    /// Appends the record of a finished game to the archive.
    fn archive(&self, record: &GameRecord) -> anyhow::Result<()>;
}

/// Stores games in a sled database.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
    games: sled::Tree,
    archive: sled::Tree,
}

impl SledStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let db = sled::open(path)?;
        Ok(Self {
            games: db.open_tree("games")?,
            archive: db.open_tree("archive")?,
            db,
        })
    }

    /// The tree holding archived game records, keyed by a big-endian sequence number.
    pub fn archive_tree(&self) -> sled::Tree {
        self.archive.clone()
    }
}

impl GameStore for SledStore {
    fn save(&self, id: &str, game: &StoredGame) -> anyhow::Result<()> {
        self.games.insert(id.as_bytes(), serde_json::to_vec(game)?)?;
        Ok(())
    }

    fn remove(&self, id: &str) -> anyhow::Result<()> {
        self.games.remove(id.as_bytes())?;
        Ok(())
    }

    fn load_all(&self) -> anyhow::Result<Vec<(String, StoredGame)>> {
        let mut games = vec![];
        for entry in self.games.iter() {
            let (id, game) = entry?;
            let id = String::from_utf8(id.to_vec())?;
            let Ok(game) = serde_json::from_slice(&game) else {
                log::warn!("Skipping unreadable game: {}", id);
                continue;
            };
            games.push((id, game));
        }
        Ok(games)
    }

    fn archive(&self, record: &GameRecord) -> anyhow::Result<()> {
        let key = self.db.generate_id()?.to_be_bytes();
        self.archive.insert(key, serde_json::to_vec(record)?)?;
        Ok(())
    }
}

/// Keeps games in memory only; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<String, Vec<u8>>>,
    archive: Mutex<Vec<GameRecord>>,
}

impl MemoryStore {
    /// The records archived so far.
    pub fn archived(&self) -> Vec<GameRecord> {
        self.archive.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl GameStore for MemoryStore {
    fn save(&self, id: &str, game: &StoredGame) -> anyhow::Result<()> {
        let data = serde_json::to_vec(game)?;
        let mut games = self.games.lock().map_err(|_| anyhow::anyhow!("store poisoned"))?;
        games.insert(id.to_string(), data);
        Ok(())
    }

    fn remove(&self, id: &str) -> anyhow::Result<()> {
        let mut games = self.games.lock().map_err(|_| anyhow::anyhow!("store poisoned"))?;
        games.remove(id);
        Ok(())
    }

    fn load_all(&self) -> anyhow::Result<Vec<(String, StoredGame)>> {
        let games = self.games.lock().map_err(|_| anyhow::anyhow!("store poisoned"))?;
        Ok(games
            .iter()
            .filter_map(|(id, data)| Some((id.clone(), serde_json::from_slice(data).ok()?)))
            .collect())
    }

    fn archive(&self, record: &GameRecord) -> anyhow::Result<()> {
        let mut archive = self.archive.lock().map_err(|_| anyhow::anyhow!("store poisoned"))?;
        archive.push(record.clone());
        Ok(())
    }
}
