//! WebSocket upgrade handler.
//!
//! Transport-level session tagging: the client presents its session id as
//! a query parameter (standing in for a session cookie); a connection
//! without one is assigned a fresh id. The hub immediately answers with
//! an `init` event carrying the assigned id.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::warn;

use matchhub_core::types::SessionId;

use crate::state::AppState;

/// Query parameters for the WebSocket upgrade.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Session id from a previous connection, if resuming.
    pub sid: Option<SessionId>,
}

/// GET /ws?sid={uuid} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Response {
    let session_id = query.sid.unwrap_or_else(SessionId::new);
    ws.on_upgrade(move |socket| handle_ws_connection(state, session_id, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, session_id: SessionId, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.hub.connect(session_id);

    // Forward queued outbound envelopes to the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound frames in arrival order.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.hub.handle_inbound(&handle, &text).await;
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %handle.id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.hub.disconnect(&handle);
}
