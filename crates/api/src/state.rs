use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: starklytics_db::DbPool,
    /// Server configuration (JWT secrets, CORS origins, RPC endpoint).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients and their
    /// query-result subscriptions).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<starklytics_events::EventBus>,
}
