//! Starklytics event bus and notification infrastructure.
//!
//! Building blocks for the platform-wide event system:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the canonical domain event envelope.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `events` table.
//!
//! The API layer fans `query.result_inserted` events out to WebSocket
//! subscribers so the query editor and dashboard widgets see new results
//! without polling.

pub mod bus;
pub mod persistence;

pub use bus::{event_types, EventBus, PlatformEvent};
pub use persistence::EventPersistence;
