//! Starklytics domain core.
//!
//! Pure domain logic with zero internal dependencies so it can be used by
//! the API/repository layer and any future CLI or worker tooling:
//!
//! - [`dashboard`] -- the dashboard composition model: widgets, per-breakpoint
//!   grid layouts, and the mutation rules that keep them consistent.
//! - [`visualization`] -- chart kinds, axis/aggregation configuration, and
//!   the client-side group/reduce step applied to query result rows.
//! - [`export`] -- the downloadable dashboard export document.
//! - [`bounty`] -- bounty difficulty tiers, participant states, and
//!   create/join validation.

pub mod bounty;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod types;
pub mod visualization;

pub use error::CoreError;
