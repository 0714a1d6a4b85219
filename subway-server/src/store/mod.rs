//! Persistence collaborators.
//!
//! The core never performs I/O; everything the service layer reads or
//! writes goes through [`SubwayStore`]. The in-memory implementation backs
//! both the server binary and the service-layer tests.

use std::collections::HashMap;

use chrono::NaiveTime;
use parking_lot::RwLock;

use crate::domain::{Line, LineId, Station, StationId};

/// Store interface the service layer depends on.
///
/// This abstraction allows the service to be tested against a store the
/// tests control. Stations and lines are created and destroyed here; line
/// segments are only ever mutated through the domain operations and
/// persisted wholesale via [`SubwayStore::save_line`].
pub trait SubwayStore {
    /// Allocate an id and persist a new station.
    ///
    /// Returns `None` when the name is already taken; station names are
    /// unique across the network.
    fn create_station(&self, name: &str) -> Option<Station>;

    /// Delete a station record. Returns false if the id was unknown.
    fn delete_station(&self, id: StationId) -> bool;

    /// All stations, ordered by id.
    fn load_all_stations(&self) -> Vec<Station>;

    /// Resolve stations for an ordered id sequence.
    ///
    /// The result preserves the input order; ids with no station record are
    /// skipped.
    fn load_stations_by_ids(&self, ids: &[StationId]) -> Vec<Station>;

    /// Look up a station by its unique name.
    fn find_station_by_name(&self, name: &str) -> Option<Station>;

    /// Allocate an id and persist a new, empty line.
    fn create_line(
        &self,
        name: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        interval_mins: u32,
    ) -> Line;

    /// Delete a line and its segments. Returns false if the id was unknown.
    fn delete_line(&self, id: LineId) -> bool;

    /// Load a line with its segments.
    fn load_line(&self, id: LineId) -> Option<Line>;

    /// All lines with their segments, ordered by id.
    fn load_all_lines(&self) -> Vec<Line>;

    /// Persist the full current state of a line, segments included.
    fn save_line(&self, line: &Line);
}

/// In-memory store: id-keyed maps behind a lock, with generated keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    stations: HashMap<StationId, Station>,
    lines: HashMap<LineId, Line>,
    next_station_id: u64,
    next_line_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubwayStore for MemoryStore {
    fn create_station(&self, name: &str) -> Option<Station> {
        let mut inner = self.inner.write();
        if inner.stations.values().any(|s| s.name == name) {
            return None;
        }
        inner.next_station_id += 1;
        let station = Station::new(StationId(inner.next_station_id), name);
        inner.stations.insert(station.id, station.clone());
        Some(station)
    }

    fn delete_station(&self, id: StationId) -> bool {
        self.inner.write().stations.remove(&id).is_some()
    }

    fn load_all_stations(&self) -> Vec<Station> {
        let inner = self.inner.read();
        let mut stations: Vec<Station> = inner.stations.values().cloned().collect();
        stations.sort_by_key(|s| s.id);
        stations
    }

    fn load_stations_by_ids(&self, ids: &[StationId]) -> Vec<Station> {
        let inner = self.inner.read();
        ids.iter()
            .filter_map(|id| inner.stations.get(id).cloned())
            .collect()
    }

    fn find_station_by_name(&self, name: &str) -> Option<Station> {
        let inner = self.inner.read();
        inner.stations.values().find(|s| s.name == name).cloned()
    }

    fn create_line(
        &self,
        name: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        interval_mins: u32,
    ) -> Line {
        let mut inner = self.inner.write();
        inner.next_line_id += 1;
        let line = Line::new(
            LineId(inner.next_line_id),
            name,
            start_time,
            end_time,
            interval_mins,
        );
        inner.lines.insert(line.id, line.clone());
        line
    }

    fn delete_line(&self, id: LineId) -> bool {
        self.inner.write().lines.remove(&id).is_some()
    }

    fn load_line(&self, id: LineId) -> Option<Line> {
        self.inner.read().lines.get(&id).cloned()
    }

    fn load_all_lines(&self) -> Vec<Line> {
        let inner = self.inner.read();
        let mut lines: Vec<Line> = inner.lines.values().cloned().collect();
        lines.sort_by_key(|l| l.id);
        lines
    }

    fn save_line(&self, line: &Line) {
        self.inner.write().lines.insert(line.id, line.clone());
    }
}
