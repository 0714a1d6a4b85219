//! Line segments.

use super::StationId;

/// A directed edge between two stations within one line.
///
/// `prev == None` marks the head segment of a chain: no station precedes
/// `station`. Distance and duration are unsigned, so weights are
/// non-negative by construction and the graph layer can rely on Dijkstra's
/// precondition without checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    /// Predecessor station, or `None` for the head segment.
    pub prev: Option<StationId>,

    /// The station this segment ends at.
    pub station: StationId,

    /// Physical distance of the segment.
    pub distance: u32,

    /// Travel duration of the segment.
    pub duration: u32,
}

impl LineSegment {
    /// Create a segment.
    pub fn new(prev: Option<StationId>, station: StationId, distance: u32, duration: u32) -> Self {
        Self {
            prev,
            station,
            distance,
            duration,
        }
    }

    /// True if this is the head segment of its chain.
    pub fn is_head(&self) -> bool {
        self.prev.is_none()
    }
}
