pub mod auth;
pub mod bounties;
pub mod dashboards;
pub mod profile;
pub mod queries;
pub mod transactions;
