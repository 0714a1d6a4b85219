//! Subway network administration server.
//!
//! Manages transit lines as ordered chains of station-to-station segments
//! and answers shortest-path queries over the union of all lines, weighted
//! by either physical distance or travel duration.

pub mod domain;
pub mod graph;
pub mod service;
pub mod store;
pub mod web;
