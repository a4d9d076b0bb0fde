//! The game hub — composes the realtime subsystems and dispatches
//! inbound events.
//!
//! Each connection's events are processed in arrival order by its own
//! transport task; events from different connections interleave
//! arbitrarily. The hub parses frames, gates authentication, routes to
//! the owning component, and shapes error envelopes for the caller. All
//! success deliveries (including counterpart notifications) happen inside
//! the components themselves.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use matchhub_auth::AccountService;
use matchhub_core::config::game::GameConfig;
use matchhub_core::config::realtime::RealtimeConfig;
use matchhub_core::types::SessionId;
use matchhub_entity::{GameStore, GamerStore};

use crate::connection::ConnectionHandle;
use crate::game::GameService;
use crate::login::LoginService;
use crate::matchmaking::MatchCoordinator;
use crate::message::{events, ClientRequest, Envelope};
use crate::presence::GamerDirectory;
use crate::session::SessionRegistry;

/// Central realtime hub tying together the session registry, gamer
/// directory, match coordinator, and game session service.
pub struct GameHub {
    registry: Arc<SessionRegistry>,
    directory: Arc<GamerDirectory>,
    login: LoginService,
    coordinator: MatchCoordinator,
    games: GameService,
    channel_buffer_size: usize,
}

impl GameHub {
    /// Create a hub with all subsystems wired to the given collaborators.
    pub fn new(
        realtime_config: &RealtimeConfig,
        game_config: &GameConfig,
        accounts: Arc<AccountService>,
        gamers: Arc<dyn GamerStore>,
        games: Arc<dyn GameStore>,
    ) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let directory = Arc::new(GamerDirectory::new(registry.clone(), gamers.clone()));
        let login = LoginService::new(registry.clone(), directory.clone(), accounts);
        let coordinator = MatchCoordinator::new(
            registry.clone(),
            gamers,
            games.clone(),
            game_config.board_size,
        );
        let games = GameService::new(registry.clone(), games);

        info!("Realtime hub initialized");

        Self {
            registry,
            directory,
            login,
            coordinator,
            games,
            channel_buffer_size: realtime_config.channel_buffer_size,
        }
    }

    /// Accept a connection tagged with a session id.
    ///
    /// Binds it as the session's single live connection, fires the
    /// `init` event carrying the session id, and returns the handle plus
    /// the receiver the transport drains for outbound frames.
    pub fn connect(&self, session_id: SessionId) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(session_id, tx));

        self.registry.bind(handle.clone());
        handle.send(&Envelope::with_result(events::INIT, &session_id));

        info!(
            conn_id = %handle.id,
            session_id = %session_id,
            "Connection registered"
        );

        (handle, rx)
    }

    /// Release a closed connection. Authentication state for the session
    /// id is retained; only the live-connection binding is removed.
    pub fn disconnect(&self, handle: &ConnectionHandle) {
        self.registry.unbind(&handle.session_id, &handle.id);
        info!(
            conn_id = %handle.id,
            session_id = %handle.session_id,
            "Connection released"
        );
    }

    /// Process one inbound frame from a connection.
    pub async fn handle_inbound(&self, handle: &Arc<ConnectionHandle>, raw: &str) {
        let request: ClientRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                handle.send(&Envelope::error(
                    events::ERROR,
                    format!("Failed to parse message: {e}"),
                ));
                return;
            }
        };

        let event = request.event_name();

        if request.requires_authentication()
            && !self.registry.is_authenticated(&handle.session_id)
        {
            handle.send(&Envelope::error(event, "User not authenticated"));
            return;
        }

        let sid = handle.session_id;
        let outcome = match request {
            ClientRequest::Register {
                full_name,
                user_name,
                password,
            } => {
                self.login
                    .register(handle, &full_name, &user_name, &password)
                    .await
            }
            ClientRequest::Login {
                user_name,
                password,
            } => self.login.login(handle, &user_name, &password).await,
            ClientRequest::FindAllAvailableGamers => {
                match self.directory.list_available(&sid).await {
                    Ok(gamers) => {
                        handle.send(&Envelope::with_result(event, &gamers));
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            ClientRequest::InviteGamer { sid: target } => {
                self.coordinator.invite(&sid, &target).await
            }
            ClientRequest::DeclineGame { sid: target } => {
                self.coordinator.decline(&sid, &target).await
            }
            ClientRequest::AcceptGame { sid: target } => {
                self.coordinator.accept(&sid, &target).await
            }
            ClientRequest::PlaceMarker { game_id, row, col } => {
                self.games.place_marker(&sid, &game_id, row, col).await
            }
            ClientRequest::SendMessage { game_id, message } => {
                self.games.send_message(&sid, &game_id, &message).await
            }
        };

        if let Err(e) = outcome {
            debug!(
                session_id = %sid,
                event,
                kind = %e.kind,
                error = %e,
                "Request failed"
            );
            handle.send(&Envelope::error(event, e.client_message()));
        }
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.registry.connection_count()
    }

    /// The session registry (shared with transport-level code).
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }
}
