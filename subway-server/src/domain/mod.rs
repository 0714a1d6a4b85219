//! Domain types for the subway network.
//!
//! Core model: stations, lines, and the segment chains that tie them
//! together. Chain invariants are enforced by the mutation operations in
//! [`Line`], so code that receives a line can trust that its segments form
//! exactly one simple chain.

mod error;
mod line;
mod segment;
mod station;

pub use error::ChainError;
pub use line::{Line, LineId};
pub use segment::LineSegment;
pub use station::{Station, StationId};
