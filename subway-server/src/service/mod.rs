//! Service layer: orchestrates the store and the core algorithms.
//!
//! Each operation loads the data it needs, runs the synchronous domain or
//! graph logic, and persists the result. The graph is rebuilt from a fresh
//! snapshot of all stations and all lines' segments on every path query.

use chrono::NaiveTime;
use tracing::{debug, error};

use crate::domain::{ChainError, Line, LineId, Station, StationId};
use crate::graph::{NetworkGraph, PathError, PathType};
use crate::store::SubwayStore;

/// Error from a service operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The referenced line does not exist.
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// The referenced station record does not exist.
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// A station with this name already exists.
    #[error("station name {0:?} is already taken")]
    DuplicateStationName(String),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// A line together with its stations in chain order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetail {
    pub line: Line,
    pub stations: Vec<Station>,
}

/// The result of a shortest-path query, with resolved station records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDetail {
    /// Stations along the path, source to target inclusive.
    pub stations: Vec<Station>,

    /// Total weight under the requested policy.
    pub weight: u64,
}

/// Subway administration service.
pub struct SubwayService<S> {
    store: S,
}

impl<S: SubwayStore> SubwayService<S> {
    /// Create a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a station with a network-unique name.
    pub fn create_station(&self, name: &str) -> Result<Station, ServiceError> {
        self.store
            .create_station(name)
            .ok_or_else(|| ServiceError::DuplicateStationName(name.to_string()))
    }

    /// All stations, ordered by id.
    pub fn list_stations(&self) -> Vec<Station> {
        self.store.load_all_stations()
    }

    /// Delete a station record.
    pub fn delete_station(&self, id: StationId) -> Result<(), ServiceError> {
        if self.store.delete_station(id) {
            Ok(())
        } else {
            Err(ServiceError::StationNotFound(id))
        }
    }

    /// Look up a station by name.
    pub fn find_station_by_name(&self, name: &str) -> Option<Station> {
        self.store.find_station_by_name(name)
    }

    /// Create an empty line.
    pub fn create_line(
        &self,
        name: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        interval_mins: u32,
    ) -> Line {
        self.store
            .create_line(name, start_time, end_time, interval_mins)
    }

    /// All lines, ordered by id.
    pub fn list_lines(&self) -> Vec<Line> {
        self.store.load_all_lines()
    }

    /// Load a line by id.
    pub fn find_line(&self, id: LineId) -> Result<Line, ServiceError> {
        self.store
            .load_line(id)
            .ok_or(ServiceError::LineNotFound(id))
    }

    /// Update a line's operating metadata, keeping its segments.
    pub fn update_line(
        &self,
        id: LineId,
        name: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        interval_mins: u32,
    ) -> Result<Line, ServiceError> {
        let mut line = self.find_line(id)?;
        line.name = name.to_string();
        line.start_time = start_time;
        line.end_time = end_time;
        line.interval_mins = interval_mins;
        self.store.save_line(&line);
        Ok(line)
    }

    /// Delete a line and its segments.
    pub fn delete_line(&self, id: LineId) -> Result<(), ServiceError> {
        if self.store.delete_line(id) {
            Ok(())
        } else {
            Err(ServiceError::LineNotFound(id))
        }
    }

    /// Insert a station into a line's chain and persist the result.
    ///
    /// Returns the updated station order of the line.
    pub fn add_line_station(
        &self,
        line_id: LineId,
        prev: Option<StationId>,
        station: StationId,
        distance: u32,
        duration: u32,
    ) -> Result<Vec<StationId>, ServiceError> {
        let mut line = self.find_line(line_id)?;
        line.add_segment(prev, station, distance, duration)?;
        self.store.save_line(&line);
        let order = self.ordered_ids(&line)?;
        debug!(line = %line_id, station = %station, stations = order.len(), "added line station");
        Ok(order)
    }

    /// Remove a station from a line's chain and persist the result.
    ///
    /// Returns the updated station order of the line.
    pub fn remove_line_station(
        &self,
        line_id: LineId,
        station: StationId,
    ) -> Result<Vec<StationId>, ServiceError> {
        let mut line = self.find_line(line_id)?;
        line.remove_segment(station)?;
        self.store.save_line(&line);
        let order = self.ordered_ids(&line)?;
        debug!(line = %line_id, station = %station, stations = order.len(), "removed line station");
        Ok(order)
    }

    /// A line's metadata plus its full station records in chain order.
    pub fn find_line_with_stations(&self, line_id: LineId) -> Result<LineDetail, ServiceError> {
        let line = self.find_line(line_id)?;
        let ids = self.ordered_ids(&line)?;
        let stations = self.store.load_stations_by_ids(&ids);
        Ok(LineDetail { line, stations })
    }

    /// Every line with its stations in chain order.
    pub fn whole_lines(&self) -> Result<Vec<LineDetail>, ServiceError> {
        self.store
            .load_all_lines()
            .into_iter()
            .map(|line| {
                let ids = self.ordered_ids(&line)?;
                let stations = self.store.load_stations_by_ids(&ids);
                Ok(LineDetail { line, stations })
            })
            .collect()
    }

    /// Shortest path between two stations across every line's segments.
    ///
    /// Rebuilds the graph for `path_type` from the current snapshot; the
    /// same segments produce different graphs per policy.
    pub fn find_shortest_path(
        &self,
        source: StationId,
        target: StationId,
        path_type: PathType,
    ) -> Result<PathDetail, ServiceError> {
        let stations = self.store.load_all_stations();
        let lines = self.store.load_all_lines();

        let graph = NetworkGraph::build(
            stations.iter().map(|s| s.id),
            lines.iter().flat_map(|l| l.segments.iter()),
            path_type,
        );
        let path = graph.shortest_path(source, target)?;

        debug!(
            %source,
            %target,
            ?path_type,
            weight = path.weight,
            hops = path.stations.len(),
            "shortest path found"
        );

        let records = self.store.load_stations_by_ids(&path.stations);
        Ok(PathDetail {
            stations: records,
            weight: path.weight,
        })
    }

    /// Derive a line's station order, escalating corruption.
    ///
    /// A corrupted chain means a prior mutation broke the invariant; it is
    /// logged at error level and propagated, never swallowed.
    fn ordered_ids(&self, line: &Line) -> Result<Vec<StationId>, ServiceError> {
        line.ordered_station_ids().map_err(|e| {
            if matches!(e, ChainError::Corrupted(_)) {
                error!(line = %line.id, error = %e, "segment chain invariant violated");
            }
            ServiceError::from(e)
        })
    }
}
