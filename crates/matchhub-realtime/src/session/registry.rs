//! Session registry — maps session ids to live connections and tracks
//! per-session authentication state.
//!
//! The registry is internally synchronized; higher-level operations may
//! interleave arbitrarily between a registry read and their eventual
//! storage write, and never hold a registry lock across an await.
//!
//! Authentication state is keyed by session id independently of the
//! connection's lifetime: disconnecting removes only the connection
//! binding, so a reconnect carrying the same session id resumes its
//! authenticated state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use matchhub_core::types::SessionId;

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::message::Envelope;

/// Per-session state, surviving connection churn.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Bound user name once the session authenticated.
    pub user_name: Option<String>,
    /// When the session was first seen.
    pub created_at: DateTime<Utc>,
}

/// Maps each session id to the single live connection currently bound to
/// it, plus authentication state per session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Session id → current live connection.
    connections: DashMap<SessionId, Arc<ConnectionHandle>>,
    /// Session id → session state (auth flag), independent of connections.
    sessions: DashMap<SessionId, SessionState>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a connection as the single live connection for its session
    /// id. A previous connection under the same id is displaced and
    /// marked closed.
    pub fn bind(&self, handle: Arc<ConnectionHandle>) {
        let session_id = handle.session_id;

        if let Some(previous) = self.connections.insert(session_id, handle) {
            previous.mark_closed();
            debug!(session_id = %session_id, "Displaced previous connection for session");
        }

        self.sessions.entry(session_id).or_insert_with(|| SessionState {
            user_name: None,
            created_at: Utc::now(),
        });
    }

    /// Remove the connection binding for a session, but only if the bound
    /// connection is still the given one — a close event from a displaced
    /// connection must not unbind its successor. Authentication state is
    /// retained.
    pub fn unbind(&self, session_id: &SessionId, connection_id: &ConnectionId) {
        if let Some((_, handle)) = self
            .connections
            .remove_if(session_id, |_, handle| handle.id == *connection_id)
        {
            handle.mark_closed();
        }
    }

    /// The live connection currently carrying the session id, if any.
    ///
    /// `None` is a distinct, handleable outcome — the peer disconnected
    /// or never connected — not an exceptional condition.
    pub fn resolve(&self, session_id: &SessionId) -> Option<Arc<ConnectionHandle>> {
        self.connections
            .get(session_id)
            .map(|entry| entry.value().clone())
            .filter(|handle| handle.is_alive())
    }

    /// Promote a session to authenticated, binding it to a user name.
    pub fn mark_authenticated(&self, session_id: &SessionId, user_name: &str) {
        let mut entry = self.sessions.entry(*session_id).or_insert_with(|| SessionState {
            user_name: None,
            created_at: Utc::now(),
        });
        entry.user_name = Some(user_name.to_string());
    }

    /// Whether the session has authenticated.
    pub fn is_authenticated(&self, session_id: &SessionId) -> bool {
        self.sessions
            .get(session_id)
            .map(|state| state.user_name.is_some())
            .unwrap_or(false)
    }

    /// The user name bound to an authenticated session.
    pub fn authenticated_user(&self, session_id: &SessionId) -> Option<String> {
        self.sessions
            .get(session_id)
            .and_then(|state| state.user_name.clone())
    }

    /// Session ids of every live connection except the given one.
    pub fn connected_sids_except(&self, excluding: &SessionId) -> Vec<SessionId> {
        self.connections
            .iter()
            .filter(|entry| entry.value().is_alive() && entry.key() != excluding)
            .map(|entry| *entry.key())
            .collect()
    }

    /// Every live connection except the one bound to the given session.
    pub fn all_except(&self, excluding: &SessionId) -> Vec<Arc<ConnectionHandle>> {
        self.connections
            .iter()
            .filter(|entry| entry.value().is_alive() && entry.key() != excluding)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Deliver an envelope to every live connection except the excluded
    /// session's.
    pub fn broadcast_except(&self, excluding: &SessionId, envelope: &Envelope) {
        for handle in self.all_except(excluding) {
            handle.send(envelope);
        }
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
