//! Periodic WebSocket heartbeat.

use std::sync::Arc;
use std::time::Duration;

use crate::ws::WsManager;

/// Interval between Ping frames.
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn the heartbeat task.
///
/// Pings every connected client on a fixed interval so intermediate proxies
/// keep connections open and dead peers are detected. The returned handle
/// is aborted during shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
        loop {
            interval.tick().await;
            ws_manager.ping_all().await;
        }
    })
}
