//! Web layer for the subway administration server.
//!
//! Provides HTTP endpoints for station and line administration and for
//! shortest-path queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
