pub mod auth;
pub mod bounties;
pub mod dashboards;
pub mod health;
pub mod profile;
pub mod queries;
pub mod transactions;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                WebSocket (query-result subscriptions)
///
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /queries                           list, create
/// /queries/{id}                      update, delete
/// /queries/{id}/favorite             set favorite flag (POST)
/// /queries/{id}/run                  execute via mock engine (POST)
/// /queries/{id}/results              latest cached result (GET)
/// /queries/{id}/columns              axis options from latest result (GET)
///
/// /dashboards                        list, save (upsert by user+name)
/// /dashboards/{id}                   get, delete
/// /dashboards/{id}/export            download as JSON document (GET)
///
/// /bounties                          list, create
/// /bounties/{id}                     get
/// /bounties/{id}/participants        list participants (GET)
/// /bounties/{id}/join                join (POST)
///
/// /profile                           get, update (auth required)
///
/// /transactions                      list caller's ledger (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Saved queries, mock execution, cached results.
        .nest("/queries", queries::router())
        // Dashboard persistence and export.
        .nest("/dashboards", dashboards::router())
        // Bounty board.
        .nest("/bounties", bounties::router())
        // Caller's profile.
        .nest("/profile", profile::router())
        // Caller's transaction ledger.
        .nest("/transactions", transactions::router())
}
