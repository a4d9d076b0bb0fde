//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use matchhub_core::types::SessionId;

use crate::message::Envelope;

/// Unique connection identifier, distinct from the session id: a session
/// id can be carried by successive connections, each with its own
/// connection id.
pub type ConnectionId = Uuid;

/// A handle to a single live connection.
///
/// Holds the sender half of the outbound message queue plus the session
/// tag the transport assigned to the connection. Delivery is
/// fire-and-forget: sends into a full or closed queue are dropped, never
/// awaited.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Session this connection carries.
    pub session_id: SessionId,
    /// Sender for serialized outbound envelopes.
    sender: mpsc::Sender<String>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(session_id: SessionId, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Send an envelope to this connection. Returns `false` when the
    /// message was dropped (connection dead or buffer full).
    pub fn send(&self, envelope: &Envelope) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(envelope.to_json()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    conn_id = %self.id,
                    session_id = %self.session_id,
                    "Connection send buffer full, dropping message"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Check if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as closed.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
