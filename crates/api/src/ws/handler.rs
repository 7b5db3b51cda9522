//! WebSocket upgrade handler and per-connection message loop.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use starklytics_core::types::DbId;

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Inbound client messages.
///
/// ```json
/// { "subscribe":   { "query_id": 42 } }
/// { "unsubscribe": { "query_id": 42 } }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ClientMessage {
    Subscribe { query_id: DbId },
    Unsubscribe { query_id: DbId },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `WsManager` and
/// managed by two spawned tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound subscribe/unsubscribe messages on the current task.
///   4. Cleans up on disconnect, dropping the connection's subscriptions.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), None).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                dispatch_client_message(&ws_manager, &conn_id, text.as_str()).await;
            }
            Ok(_msg) => {
                // Binary frames are not part of the protocol; ignore.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection (and its subscriptions) and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Parse and apply one inbound text frame.
///
/// Malformed frames are logged and ignored; a broken client must not take
/// down the connection loop.
async fn dispatch_client_message(ws_manager: &WsManager, conn_id: &str, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Subscribe { query_id }) => {
            ws_manager.subscribe_query(conn_id, query_id).await;
            tracing::debug!(conn_id = %conn_id, query_id, "Subscribed to query results");
        }
        Ok(ClientMessage::Unsubscribe { query_id }) => {
            ws_manager.unsubscribe_query(conn_id, query_id).await;
            tracing::debug!(conn_id = %conn_id, query_id, "Unsubscribed from query results");
        }
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed client message");
        }
    }
}
