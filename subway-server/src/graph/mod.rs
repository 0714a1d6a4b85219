//! Weighted multigraph over the whole network and shortest-path queries.
//!
//! The graph is rebuilt from the current station/segment snapshot for every
//! query; nothing is maintained incrementally. Two lines connecting the same
//! pair of stations contribute two distinct edges with their own weights
//! (express vs. local service), so edges are never collapsed.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{LineSegment, StationId};

/// Which segment attribute becomes edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Distance,
    Duration,
}

impl PathType {
    /// The weight of a segment under this policy.
    pub fn weight_of(self, segment: &LineSegment) -> u64 {
        match self {
            PathType::Distance => u64::from(segment.distance),
            PathType::Duration => u64::from(segment.duration),
        }
    }
}

/// Error from a shortest-path query.
///
/// `Display` and `Error` are implemented by hand: thiserror would treat the
/// `source` field of [`PathError::NoPathFound`] as the error source, which
/// would require `StationId: Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The station is not a vertex of the graph.
    UnknownStation(StationId),

    /// Source and target exist but no sequence of segments connects them.
    NoPathFound {
        source: StationId,
        target: StationId,
    },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::UnknownStation(station) => write!(f, "unknown station {station}"),
            PathError::NoPathFound { source, target } => {
                write!(f, "no path from station {source} to station {target}")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A shortest path: the station sequence from source to target inclusive,
/// and its total weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub stations: Vec<StationId>,
    pub weight: u64,
}

/// A weighted directed multigraph built for one weighting policy.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    /// Outgoing edges per vertex. Parallel edges are distinct entries.
    adjacency: HashMap<StationId, Vec<(StationId, u64)>>,
}

impl NetworkGraph {
    /// Build the graph for `path_type` from every station and every line's
    /// segments.
    ///
    /// Every station becomes a vertex, so stations no segment references
    /// stay queryable (just unreachable). Head segments carry no
    /// predecessor and contribute no edge.
    pub fn build<'a>(
        stations: impl IntoIterator<Item = StationId>,
        segments: impl IntoIterator<Item = &'a LineSegment>,
        path_type: PathType,
    ) -> Self {
        let mut adjacency: HashMap<StationId, Vec<(StationId, u64)>> = HashMap::new();

        for station in stations {
            adjacency.entry(station).or_default();
        }

        for segment in segments {
            if let Some(prev) = segment.prev {
                adjacency
                    .entry(prev)
                    .or_default()
                    .push((segment.station, path_type.weight_of(segment)));
            }
        }

        Self { adjacency }
    }

    /// True if `station` is a vertex.
    pub fn has_vertex(&self, station: StationId) -> bool {
        self.adjacency.contains_key(&station)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Minimum-weight path from `source` to `target`, inclusive.
    ///
    /// Dijkstra over non-negative weights. Querying a station against
    /// itself yields a single-station path of weight 0, even for a station
    /// no segment touches.
    pub fn shortest_path(
        &self,
        source: StationId,
        target: StationId,
    ) -> Result<ShortestPath, PathError> {
        if !self.has_vertex(source) {
            return Err(PathError::UnknownStation(source));
        }
        if !self.has_vertex(target) {
            return Err(PathError::UnknownStation(target));
        }

        let mut dist: HashMap<StationId, u64> = HashMap::new();
        let mut came_from: HashMap<StationId, StationId> = HashMap::new();
        let mut heap = BinaryHeap::new();

        dist.insert(source, 0);
        heap.push(Reverse((0u64, source)));

        while let Some(Reverse((d, station))) = heap.pop() {
            if d > dist.get(&station).copied().unwrap_or(u64::MAX) {
                continue; // stale heap entry
            }
            if station == target {
                break;
            }

            let Some(edges) = self.adjacency.get(&station) else {
                continue;
            };
            for &(next, weight) in edges {
                let candidate = d + weight;
                if candidate < dist.get(&next).copied().unwrap_or(u64::MAX) {
                    dist.insert(next, candidate);
                    came_from.insert(next, station);
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        let Some(&weight) = dist.get(&target) else {
            return Err(PathError::NoPathFound { source, target });
        };

        // Walk predecessors back to the source; the source has no entry,
        // which terminates the walk.
        let mut stations = vec![target];
        let mut current = target;
        while let Some(&prev) = came_from.get(&current) {
            stations.push(prev);
            current = prev;
        }
        stations.reverse();

        Ok(ShortestPath { stations, weight })
    }

    /// Total weight of the shortest path; same failure conditions as
    /// [`NetworkGraph::shortest_path`].
    pub fn path_weight(&self, source: StationId, target: StationId) -> Result<u64, PathError> {
        Ok(self.shortest_path(source, target)?.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(prev: u64, station: u64, distance: u32, duration: u32) -> LineSegment {
        LineSegment::new(Some(StationId(prev)), StationId(station), distance, duration)
    }

    fn head(station: u64) -> LineSegment {
        LineSegment::new(None, StationId(station), 0, 0)
    }

    fn ids(range: std::ops::RangeInclusive<u64>) -> Vec<StationId> {
        range.map(StationId).collect()
    }

    fn path_of(graph: &NetworkGraph, source: u64, target: u64) -> (Vec<u64>, u64) {
        let path = graph
            .shortest_path(StationId(source), StationId(target))
            .unwrap();
        (path.stations.into_iter().map(|s| s.0).collect(), path.weight)
    }

    #[test]
    fn chain_path() {
        let segments = vec![head(1), seg(1, 2, 10, 1), seg(2, 3, 10, 1)];
        let graph = NetworkGraph::build(ids(1..=3), &segments, PathType::Distance);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(path_of(&graph, 1, 3), (vec![1, 2, 3], 20));
    }

    #[test]
    fn source_equals_target_is_zero_weight() {
        let segments = vec![head(1), seg(1, 2, 10, 10)];
        let graph = NetworkGraph::build(ids(1..=3), &segments, PathType::Distance);

        // Station 3 is isolated but still a vertex.
        assert_eq!(path_of(&graph, 3, 3), (vec![3], 0));
        assert_eq!(path_of(&graph, 1, 1), (vec![1], 0));
    }

    #[test]
    fn parallel_edges_keep_the_cheaper_service() {
        // Line A connects 1-2 at distance 10, line B at distance 5.
        let segments = vec![head(1), seg(1, 2, 10, 3), head(1), seg(1, 2, 5, 8)];
        let graph = NetworkGraph::build(ids(1..=2), &segments, PathType::Distance);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(path_of(&graph, 1, 2), (vec![1, 2], 5));
    }

    #[test]
    fn policy_selects_the_weight_attribute() {
        // By distance the 1-2 edge from line B wins; by duration line A's.
        let segments = vec![head(1), seg(1, 2, 10, 3), head(1), seg(1, 2, 5, 8)];

        let by_distance = NetworkGraph::build(ids(1..=2), &segments, PathType::Distance);
        let by_duration = NetworkGraph::build(ids(1..=2), &segments, PathType::Duration);

        assert_eq!(by_distance.path_weight(StationId(1), StationId(2)), Ok(5));
        assert_eq!(by_duration.path_weight(StationId(1), StationId(2)), Ok(3));
    }

    #[test]
    fn detour_wins_when_cheaper() {
        // Direct 1->4 costs 100; 1->2->3->4 costs 30.
        let segments = vec![
            head(1),
            seg(1, 4, 100, 100),
            seg(1, 2, 10, 10),
            seg(2, 3, 10, 10),
            seg(3, 4, 10, 10),
        ];
        let graph = NetworkGraph::build(ids(1..=4), &segments, PathType::Distance);

        assert_eq!(path_of(&graph, 1, 4), (vec![1, 2, 3, 4], 30));
    }

    #[test]
    fn edges_are_directed() {
        let segments = vec![head(1), seg(1, 2, 10, 10)];
        let graph = NetworkGraph::build(ids(1..=2), &segments, PathType::Distance);

        assert_eq!(
            graph.shortest_path(StationId(2), StationId(1)),
            Err(PathError::NoPathFound {
                source: StationId(2),
                target: StationId(1),
            })
        );
    }

    #[test]
    fn disconnected_stations_have_no_path() {
        let segments = vec![head(1), seg(1, 2, 10, 10), head(3), seg(3, 4, 10, 10)];
        let graph = NetworkGraph::build(ids(1..=4), &segments, PathType::Distance);

        assert_eq!(
            graph.shortest_path(StationId(1), StationId(4)),
            Err(PathError::NoPathFound {
                source: StationId(1),
                target: StationId(4),
            })
        );
    }

    #[test]
    fn unknown_station_rejected() {
        let no_segments: Vec<LineSegment> = Vec::new();
        let graph = NetworkGraph::build(ids(1..=2), &no_segments, PathType::Distance);

        assert_eq!(
            graph.shortest_path(StationId(9), StationId(1)),
            Err(PathError::UnknownStation(StationId(9)))
        );
        assert_eq!(
            graph.shortest_path(StationId(1), StationId(9)),
            Err(PathError::UnknownStation(StationId(9)))
        );
    }

    #[test]
    fn head_segments_contribute_no_edge() {
        let segments = vec![head(1), head(2)];
        let graph = NetworkGraph::build(ids(1..=2), &segments, PathType::Distance);

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn removing_a_line_never_shortens_paths() {
        // With line B's cheap edge the best 1->2 is 5; without it, 10.
        let line_a = vec![head(1), seg(1, 2, 10, 10)];
        let line_b = vec![head(1), seg(1, 2, 5, 5)];

        let all: Vec<_> = line_a.iter().chain(line_b.iter()).cloned().collect();
        let with_b = NetworkGraph::build(ids(1..=2), &all, PathType::Distance);
        let without_b = NetworkGraph::build(ids(1..=2), &line_a, PathType::Distance);

        let before = with_b.path_weight(StationId(1), StationId(2)).unwrap();
        let after = without_b.path_weight(StationId(1), StationId(2)).unwrap();
        assert!(after >= before);
        assert_eq!((before, after), (5, 10));
    }

    #[test]
    fn zero_weight_edges_are_valid() {
        let segments = vec![head(1), seg(1, 2, 0, 0), seg(2, 3, 0, 0)];
        let graph = NetworkGraph::build(ids(1..=3), &segments, PathType::Distance);

        assert_eq!(path_of(&graph, 1, 3), (vec![1, 2, 3], 0));
    }
}
