//! Shared test helpers: in-memory implementations of the storage
//! collaborator traits and a thin client driving the hub the way the
//! transport layer does.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use matchhub_board::Board;
use matchhub_core::config::game::GameConfig;
use matchhub_core::config::realtime::RealtimeConfig;
use matchhub_core::error::AppError;
use matchhub_core::result::AppResult;
use matchhub_core::types::{GameId, SessionId};
use matchhub_entity::game::{ChatEntry, Game, GameState};
use matchhub_entity::gamer::Gamer;
use matchhub_entity::user::{NewUser, User};
use matchhub_entity::{GameStore, GamerStore, UserStore};

use matchhub_auth::AccountService;
use matchhub_realtime::{ConnectionHandle, GameHub};

/// In-memory user store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.user_name == data.user_name) {
            return Err(AppError::already_exists(format!(
                "User with user name {} already exists",
                data.user_name
            )));
        }
        let user = User {
            id: matchhub_core::types::UserId::new(),
            user_name: data.user_name.clone(),
            full_name: data.full_name.clone(),
            password_hash: data.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// In-memory gamer presence store, insertion-ordered.
#[derive(Default)]
pub struct MemoryGamerStore {
    gamers: Mutex<Vec<Gamer>>,
}

impl MemoryGamerStore {
    /// Backdate a record so TTL purging can be exercised.
    pub fn backdate(&self, user_name: &str, by: Duration) {
        let mut gamers = self.gamers.lock().unwrap();
        if let Some(gamer) = gamers.iter_mut().find(|g| g.user_name == user_name) {
            gamer.updated_on = Utc::now() - chrono::Duration::from_std(by).unwrap();
        }
    }

    pub fn contains(&self, user_name: &str) -> bool {
        self.gamers
            .lock()
            .unwrap()
            .iter()
            .any(|g| g.user_name == user_name)
    }
}

#[async_trait]
impl GamerStore for MemoryGamerStore {
    async fn find_by_sid(&self, sid: &SessionId) -> AppResult<Option<Gamer>> {
        let gamers = self.gamers.lock().unwrap();
        Ok(gamers.iter().find(|g| g.sid == *sid).cloned())
    }

    async fn find_by_sids(&self, sids: &[SessionId]) -> AppResult<Vec<Gamer>> {
        let gamers = self.gamers.lock().unwrap();
        Ok(gamers
            .iter()
            .filter(|g| sids.contains(&g.sid))
            .cloned()
            .collect())
    }

    async fn touch(&self, sids: &[SessionId]) -> AppResult<u64> {
        let mut gamers = self.gamers.lock().unwrap();
        let mut touched = 0;
        for gamer in gamers.iter_mut().filter(|g| sids.contains(&g.sid)) {
            gamer.updated_on = Utc::now();
            touched += 1;
        }
        Ok(touched)
    }

    async fn upsert(&self, user_name: &str, full_name: &str, sid: &SessionId) -> AppResult<()> {
        let mut gamers = self.gamers.lock().unwrap();
        if let Some(gamer) = gamers.iter_mut().find(|g| g.user_name == user_name) {
            gamer.full_name = full_name.to_string();
            gamer.sid = *sid;
            gamer.updated_on = Utc::now();
        } else {
            gamers.push(Gamer {
                user_name: user_name.to_string(),
                full_name: full_name.to_string(),
                sid: *sid,
                updated_on: Utc::now(),
            });
        }
        Ok(())
    }

    async fn purge_stale(&self, ttl: Duration) -> AppResult<u64> {
        let cutoff = Utc::now() - chrono::Duration::from_std(ttl).unwrap();
        let mut gamers = self.gamers.lock().unwrap();
        let before = gamers.len();
        gamers.retain(|g| g.updated_on >= cutoff);
        Ok((before - gamers.len()) as u64)
    }
}

/// In-memory game store. The conditional board update runs under one
/// mutex, giving the same at-most-one-accepted-move-per-turn guarantee
/// as the database's conditional write.
#[derive(Default)]
pub struct MemoryGameStore {
    games: Mutex<Vec<Game>>,
}

impl MemoryGameStore {
    pub fn get(&self, id: &GameId) -> Option<Game> {
        self.games.lock().unwrap().iter().find(|g| g.id == *id).cloned()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn create(
        &self,
        player1: &Gamer,
        player2: &Gamer,
        board_size: usize,
    ) -> AppResult<Game> {
        let game = Game {
            id: GameId::new(),
            player1_sid: player1.sid,
            player1_user_name: player1.user_name.clone(),
            player1_full_name: player1.full_name.clone(),
            player2_sid: player2.sid,
            player2_user_name: player2.user_name.clone(),
            player2_full_name: player2.full_name.clone(),
            board: Board::new(board_size),
            starting_player: player1.sid,
            current_player: player1.sid,
            state: GameState::InProgress,
            chat: Vec::new(),
            created_on: Utc::now(),
        };
        self.games.lock().unwrap().push(game.clone());
        Ok(game)
    }

    async fn find(&self, id: &GameId) -> AppResult<Option<Game>> {
        Ok(self.get(id))
    }

    async fn update_board(
        &self,
        id: &GameId,
        acting: &SessionId,
        next: &SessionId,
        board: &Board,
    ) -> AppResult<bool> {
        let mut games = self.games.lock().unwrap();
        let Some(game) = games.iter_mut().find(|g| g.id == *id) else {
            return Ok(false);
        };
        if game.current_player != *acting {
            return Ok(false);
        }
        game.board = board.clone();
        game.current_player = *next;
        Ok(true)
    }

    async fn append_chat(&self, id: &GameId, entry: &ChatEntry) -> AppResult<()> {
        let mut games = self.games.lock().unwrap();
        let game = games
            .iter_mut()
            .find(|g| g.id == *id)
            .ok_or_else(|| AppError::not_found("No game found to update"))?;
        game.chat.push(entry.clone());
        Ok(())
    }

    async fn set_state(&self, id: &GameId, state: GameState) -> AppResult<()> {
        let mut games = self.games.lock().unwrap();
        let game = games
            .iter_mut()
            .find(|g| g.id == *id)
            .ok_or_else(|| AppError::not_found("No game found to update"))?;
        game.state = state;
        Ok(())
    }
}

/// Test application wiring the hub to in-memory collaborators.
pub struct TestApp {
    pub hub: Arc<GameHub>,
    pub gamers: Arc<MemoryGamerStore>,
    pub games: Arc<MemoryGameStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_board_size(GameConfig::default().board_size)
    }

    pub fn with_board_size(board_size: usize) -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let gamers = Arc::new(MemoryGamerStore::default());
        let games = Arc::new(MemoryGameStore::default());

        let game_config = GameConfig {
            board_size,
            ..GameConfig::default()
        };
        let accounts = Arc::new(AccountService::new(users));
        let hub = Arc::new(GameHub::new(
            &RealtimeConfig::default(),
            &game_config,
            accounts,
            gamers.clone(),
            games.clone(),
        ));

        Self { hub, gamers, games }
    }

    /// Open a connection and consume its `init` event.
    pub async fn connect(&self) -> TestClient {
        let session_id = SessionId::new();
        let (handle, rx) = self.hub.connect(session_id);
        let mut client = TestClient {
            hub: self.hub.clone(),
            handle,
            rx,
        };

        let init = client.recv().await;
        assert_eq!(init["event"], "init");
        assert_eq!(init["result"], serde_json::json!(session_id));
        client
    }

    /// Connect and register a user in one step.
    pub async fn connect_registered(
        &self,
        full_name: &str,
        user_name: &str,
        password: &str,
    ) -> TestClient {
        let mut client = self.connect().await;
        client
            .send(serde_json::json!({
                "event": "register",
                "fullName": full_name,
                "userName": user_name,
                "password": password,
            }))
            .await;
        let ok = client.recv().await;
        assert_eq!(ok["event"], "register", "registration failed: {ok}");
        assert_eq!(ok["ok"], true, "registration failed: {ok}");
        client
    }
}

/// One simulated client connection.
pub struct TestClient {
    hub: Arc<GameHub>,
    pub handle: Arc<ConnectionHandle>,
    rx: mpsc::Receiver<String>,
}

impl TestClient {
    pub fn sid(&self) -> SessionId {
        self.handle.session_id
    }

    /// Feed one inbound frame through the hub, as the transport would.
    pub async fn send(&self, frame: serde_json::Value) {
        self.hub.handle_inbound(&self.handle, &frame.to_string()).await;
    }

    /// Feed a raw (possibly malformed) frame through the hub.
    pub async fn send_raw(&self, frame: &str) {
        self.hub.handle_inbound(&self.handle, frame).await;
    }

    /// Receive the next queued envelope.
    pub async fn recv(&mut self) -> serde_json::Value {
        let raw = self.rx.recv().await.expect("expected an envelope");
        serde_json::from_str(&raw).expect("envelope is valid JSON")
    }

    /// Receive the next envelope and assert its event name.
    pub async fn recv_event(&mut self, event: &str) -> serde_json::Value {
        let envelope = self.recv().await;
        assert_eq!(envelope["event"], event, "unexpected envelope: {envelope}");
        envelope
    }

    /// Assert that no envelope is currently queued.
    pub fn assert_silent(&mut self) {
        if let Ok(raw) = self.rx.try_recv() {
            panic!("expected no envelope, got: {raw}");
        }
    }

    /// Drop the connection, as the transport does on close.
    pub fn disconnect(&self) {
        self.hub.disconnect(&self.handle);
    }
}
