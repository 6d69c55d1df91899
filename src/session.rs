use crate::error::GameError;
use crate::game::{Game, GameStatus, GameUpdate};
use crate::store::{GameRecord, GameStore, Outcome, StoredGame};
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use rand::{Rng, RngCore};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// How many times to try for a session lock before giving up.
const LOCK_ATTEMPTS: u32 = 8;
/// Initial wait between lock attempts; doubles after each failure.
const LOCK_BACKOFF: Duration = Duration::from_millis(2);
/// Games nobody has joined are left alone this long, so their creator has time to join.
const EMPTY_GRACE: Duration = Duration::from_secs(60);

/// Manages all the game sessions running on the server.
pub struct SessionManager {
    sessions: DashMap<String, SessionHandle>,
    store: Arc<dyn GameStore>,
}

/// A single game session.
pub struct Session {
    /// The game ID.
    id: String,
    /// The game itself.
    game: Game,
    /// Timestamp that the game was started.
    started: Option<DateTime<Utc>>,
    /// Whether this game has been archived.
    archived: bool,
    /// Channel for sending game state updates to clients.
    updates: watch::Sender<GameUpdate>,
    /// Where the game is persisted.
    store: Arc<dyn GameStore>,
    /// Timestamp of the last time this session was interacted with.
    last_ts: Instant,
    /// Set once the reaper has removed the session; it accepts no further changes.
    closed: bool,
}

/// Mutations take the write lock; projections share the read lock.
pub type SessionHandle = Arc<RwLock<Session>>;

/// Acquires a session for writing, backing off while another action holds it.
/// The guard must not be held across an `.await`.
pub async fn write_session(handle: &SessionHandle) -> Result<RwLockWriteGuard<'_, Session>, GameError> {
    let mut delay = LOCK_BACKOFF;
    for _ in 0..LOCK_ATTEMPTS {
        match handle.try_write() {
            Ok(session) => return Ok(session),
            Err(TryLockError::Poisoned(_)) => return Err(GameError::SessionPoisoned),
            Err(TryLockError::WouldBlock) => {}
        }
        tokio::time::sleep(delay).await;
        delay *= 2;
    }
    Err(GameError::SessionBusy)
}

/// Acquires a session for reading, backing off while a mutation is in flight.
pub async fn read_session(handle: &SessionHandle) -> Result<RwLockReadGuard<'_, Session>, GameError> {
    let mut delay = LOCK_BACKOFF;
    for _ in 0..LOCK_ATTEMPTS {
        match handle.try_read() {
            Ok(session) => return Ok(session),
            Err(TryLockError::Poisoned(_)) => return Err(GameError::SessionPoisoned),
            Err(TryLockError::WouldBlock) => {}
        }
        tokio::time::sleep(delay).await;
        delay *= 2;
    }
    Err(GameError::SessionBusy)
}

impl SessionManager {
    /// Creates the manager, restoring every game found in the store.
    pub fn new(store: Arc<dyn GameStore>) -> anyhow::Result<Self> {
        let sessions = DashMap::new();
        for (id, stored) in store.load_all()? {
            let session = Session::hydrate(id.clone(), store.clone(), stored);
            sessions.insert(id, Arc::new(RwLock::new(session)));
        }
        log::info!("Restored {} games", sessions.len());
        Ok(Self { sessions, store })
    }

    pub fn create_game(&self) -> SessionHandle {
        loop {
            let id = Self::random_id();
            let entry = self.sessions.entry(id);
            if let Entry::Occupied(_) = entry {
                continue;
            }
            let seed = rand::thread_rng().next_u64();
            let stored = StoredGame {
                game: Game::new(seed),
                started: None,
                archived: false,
            };
            let mut session = Session::hydrate(entry.key().clone(), self.store.clone(), stored);
            session.persist_game();
            log::info!("Created game {}", session.id());
            let session = Arc::new(RwLock::new(session));
            entry.or_insert(session.clone());
            break session;
        }
    }

    pub fn find_game(&self, game_id: &str) -> Result<SessionHandle, GameError> {
        self.sessions
            .get(game_id)
            .map(|session| session.clone())
            .ok_or(GameError::GameNotFound)
    }

    /// Adds a player to a pending game.
    /// Any registration under the same name in another pending game is dropped first.
    /// Games that cannot be locked are skipped.
    pub async fn join_game(&self, game_id: &str, name: &str, creator: bool) -> Result<SessionHandle, GameError> {
        let target = self.find_game(game_id)?;
        for (id, handle) in self.handles() {
            if id == game_id {
                continue;
            }
            let mut session = match write_session(&handle).await {
                Ok(session) => session,
                Err(err) => {
                    log::warn!("Could not check game {} for {}: {}", id, name, err);
                    continue;
                }
            };
            if session.game.status() == GameStatus::Pending && session.game.find_player(name).is_ok() {
                if let Err(err) = session.remove_player(name) {
                    log::warn!("Could not drop {} from game {}: {}", name, id, err);
                    continue;
                }
                log::info!("Dropped stale registration of {} from game {}", name, id);
            }
        }
        write_session(&target).await?.add_player(name, creator)?;
        Ok(target)
    }

    pub fn num_games(&self) -> usize {
        self.sessions.len()
    }

    /// The IDs of games waiting for players.
    pub async fn pending_games(&self) -> Vec<String> {
        self.games_with_status(GameStatus::Pending).await
    }

    /// The IDs of games being played.
    pub async fn in_progress_games(&self) -> Vec<String> {
        self.games_with_status(GameStatus::InProgress).await
    }

    /// Deletes games that nobody has joined, and games left idle for longer than `ttl`.
    /// Returns the number of games removed.
    ///
    /// Candidates are re-checked under the write lock and closed before they are removed,
    /// so a player who joins in the meantime either keeps the game alive or is turned away.
    pub async fn reap_games(&self, ttl: Duration) -> usize {
        let mut candidates = vec![];
        for (game_id, handle) in self.handles() {
            let expired = match read_session(&handle).await {
                Ok(session) => session.expired(ttl),
                Err(GameError::SessionBusy) => false,
                Err(_) => true,
            };
            if expired {
                candidates.push((game_id, handle));
            }
        }

        let mut removed = 0;
        for (game_id, handle) in candidates {
            let mut session = match write_session(&handle).await {
                Ok(session) if session.expired(ttl) => Some(session),
                Ok(_) | Err(GameError::SessionBusy) => continue,
                Err(_) => {
                    log::error!("Found poisoned session: {}", game_id);
                    None
                }
            };
            if let Err(err) = self.store.remove(&game_id) {
                log::error!("Could not remove game {}: {:?}", game_id, err);
                continue;
            }
            if let Some(session) = session.as_mut() {
                session.closed = true;
            }
            self.sessions.remove(&game_id);
            removed += 1;
        }
        if removed > 0 {
            log::info!("Reaped {} games", removed);
        }
        removed
    }

    async fn games_with_status(&self, status: GameStatus) -> Vec<String> {
        let mut ids = vec![];
        for (id, handle) in self.handles() {
            let listed = match read_session(&handle).await {
                Ok(session) => session.game.status() == status && session.game.num_players() > 0,
                Err(_) => false,
            };
            if listed {
                ids.push(id);
            }
        }
        ids.sort();
        ids
    }

    /// Snapshot of the session handles, so no map guard is held while locking a session.
    fn handles(&self) -> Vec<(String, SessionHandle)> {
        self.sessions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn random_id() -> String {
        let mut rng = rand::thread_rng();
        (0..4)
            .map(|_| match rng.gen_range('A'..='Z') {
                // Avoid O and I, which read like digits
                'O' => 'P',
                'I' => 'J',
                other => other,
            })
            .collect()
    }
}

impl Session {
    fn hydrate(id: String, store: Arc<dyn GameStore>, stored: StoredGame) -> Self {
        let updates = watch::channel(stored.game.get_update()).0;
        Self {
            id,
            game: stored.game,
            started: stored.started,
            archived: stored.archived,
            updates,
            store,
            last_ts: Instant::now(),
            closed: false,
        }
    }

    /// Gets the unique game ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read access to the game, for projections.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns a stream of updates for the game, starting with the current state.
    pub fn subscribe(&mut self) -> watch::Receiver<GameUpdate> {
        let rx = self.updates.subscribe();
        self.notify();
        rx
    }

    /// Adds a player to the game, replacing any earlier registration under the same name.
    pub fn add_player(&mut self, name: &str, creator: bool) -> Result<usize, GameError> {
        self.check_open()?;
        let idx = self.game.join(name, creator)?;
        log::info!("{} joined game {}", name, self.id);
        self.commit();
        Ok(idx)
    }

    /// Removes a player before the game starts.
    pub fn remove_player(&mut self, name: &str) -> Result<(), GameError> {
        self.check_open()?;
        self.game.leave(name)?;
        log::info!("{} left game {}", name, self.id);
        self.commit();
        Ok(())
    }

    /// Starts the game.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.check_open()?;
        self.game.start()?;
        self.started = Some(Utc::now());
        log::info!("Started game {} with {} players", self.id, self.game.num_players());
        self.commit();
        Ok(())
    }

    /// Performs an action on the game.
    pub fn mutate_game<F, T>(&mut self, mutation: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>,
    {
        self.check_open()?;
        let result = mutation(&mut self.game)?;
        self.commit();
        Ok(result)
    }

    /// Keeps the game session alive.
    pub fn heartbeat(&mut self) {
        self.last_ts = Instant::now();
    }

    /// Whether the game should be reaped: nobody joined within the grace period,
    /// or it has been idle for longer than `ttl`.
    fn expired(&self, ttl: Duration) -> bool {
        let idle = self.last_ts.elapsed();
        (self.game.num_players() == 0 && idle > EMPTY_GRACE) || idle > ttl
    }

    fn check_open(&self) -> Result<(), GameError> {
        if self.closed {
            return Err(GameError::GameNotFound);
        }
        Ok(())
    }

    fn commit(&mut self) {
        self.notify();
        self.persist_game();
        self.archive();
    }

    /// Notifies all connected clients of the new game state.
    fn notify(&mut self) {
        self.updates.send_replace(self.game.get_update());
        self.last_ts = Instant::now();
    }

    /// Persists the game state, so it can be recovered upon server restart.
    fn persist_game(&mut self) {
        let stored = StoredGame {
            game: self.game.clone(),
            started: self.started,
            archived: self.archived,
        };
        if let Err(err) = self.store.save(&self.id, &stored) {
            log::error!("Could not persist game {}: {:?}", self.id, err);
        }
    }

    /// Archives the game if it is over and hasn't been archived yet.
    fn archive(&mut self) {
        if !self.game.game_over() || self.archived {
            return;
        }
        let record = self.record();
        match self.store.archive(&record) {
            Ok(()) => {
                log::info!("Game {} completed: {:?}", self.id, record.outcome);
                self.archived = true;
                self.persist_game();
            }
            Err(err) => log::error!("Could not archive game {}: {:?}", self.id, err),
        }
    }

    fn record(&self) -> GameRecord {
        let winner = self.game.winners().first().map(|w| w.to_string());
        let others_lost = self.game.losers().len() + 1 == self.game.num_players();
        let outcome = match (&winner, others_lost) {
            (None, _) => Outcome::Unsolved,
            (Some(_), true) if self.game.num_players() > 1 => Outcome::LastStanding,
            (Some(_), _) => Outcome::Solved,
        };
        let finished = Utc::now();
        GameRecord {
            id: self.id.clone(),
            players: self.game.player_names().map(str::to_string).collect(),
            started: self.started.unwrap_or(finished),
            finished,
            outcome,
            winner,
        }
    }
}
