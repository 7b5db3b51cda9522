//! Event-to-WebSocket result routing.
//!
//! [`ResultRouter`] subscribes to the platform event bus and forwards every
//! `query.result_inserted` event to the WebSocket connections subscribed to
//! that query. This is the live half of the query-result contract: the
//! durable half is handled by `starklytics_events::EventPersistence`.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use starklytics_events::{event_types, PlatformEvent};
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes query-result events to subscribed WebSocket clients.
pub struct ResultRouter {
    ws_manager: Arc<WsManager>,
}

impl ResultRouter {
    /// Create a new router over the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](starklytics_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Result router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, result router shutting down");
                    break;
                }
            }
        }
    }

    /// Forward a single event to the affected subscribers.
    async fn route_event(&self, event: &PlatformEvent) {
        if event.event_type != event_types::QUERY_RESULT_INSERTED {
            return;
        }
        let Some(query_id) = event.source_entity_id else {
            return;
        };

        let frame = json!({
            "type": "query_result",
            "query_id": query_id,
            "result": event.payload,
        });

        let delivered = self
            .ws_manager
            .send_to_query_subscribers(query_id, Message::Text(frame.to_string().into()))
            .await;
        tracing::debug!(query_id, delivered, "Routed query result to subscribers");
    }
}
