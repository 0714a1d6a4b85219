//! Lines and the segment-chain maintenance algorithm.
//!
//! A line owns an unordered collection of segments that must encode exactly
//! one simple chain: exactly one segment has a `None` predecessor (the
//! head), and following successor links from it visits every station in the
//! line exactly once. The mutation operations here preserve that invariant;
//! [`Line::ordered_station_ids`] derives the station order and detects a
//! violated invariant instead of chasing it.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveTime;

use super::{ChainError, LineSegment, StationId};

/// Opaque identifier of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transit line: operating metadata plus its segment chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    pub name: String,

    /// First departure of the day.
    pub start_time: NaiveTime,

    /// Last departure of the day.
    pub end_time: NaiveTime,

    /// Minutes between dispatches.
    pub interval_mins: u32,

    /// Backing collection of segments. Element order is not meaningful;
    /// the chain order is implied by predecessor links.
    pub segments: Vec<LineSegment>,
}

impl Line {
    /// Create an empty line.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        interval_mins: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            end_time,
            interval_mins,
            segments: Vec::new(),
        }
    }

    /// True if `station` appears anywhere in the chain, as either endpoint
    /// of any segment.
    pub fn contains(&self, station: StationId) -> bool {
        self.segments
            .iter()
            .any(|s| s.station == station || s.prev == Some(station))
    }

    /// Insert `station` into the chain after `prev`.
    ///
    /// `prev == None` inserts a new head; otherwise `prev` must already be
    /// on the chain. Inserting between two existing stations replaces the
    /// edge leaving `prev` with two segments, both carrying the incoming
    /// `distance`/`duration` (the replaced edge's weights are discarded).
    pub fn add_segment(
        &mut self,
        prev: Option<StationId>,
        station: StationId,
        distance: u32,
        duration: u32,
    ) -> Result<(), ChainError> {
        if self.contains(station) {
            return Err(ChainError::DuplicateStation(station));
        }

        let Some(prev) = prev else {
            // New head: the old head, if any, now follows the inserted
            // station but keeps its own weights.
            if let Some(head) = self.segments.iter_mut().find(|s| s.is_head()) {
                head.prev = Some(station);
            }
            self.segments
                .push(LineSegment::new(None, station, distance, duration));
            return Ok(());
        };

        if !self.contains(prev) {
            return Err(ChainError::StationNotFound(prev));
        }

        if let Some(idx) = self.segments.iter().position(|s| s.prev == Some(prev)) {
            // Mid-chain: replace prev -> old with prev -> station -> old.
            let old = self.segments.remove(idx);
            self.segments
                .push(LineSegment::new(Some(prev), station, distance, duration));
            self.segments
                .push(LineSegment::new(Some(station), old.station, distance, duration));
        } else {
            // Nothing follows `prev`, so it is the tail: append.
            self.segments
                .push(LineSegment::new(Some(prev), station, distance, duration));
        }

        Ok(())
    }

    /// Remove `station` from the chain, splicing its neighbours together.
    ///
    /// Removing an interior station merges the two segments touching it
    /// into one whose distance and duration are the sums of the removed
    /// pair's.
    pub fn remove_segment(&mut self, station: StationId) -> Result<(), ChainError> {
        let idx = self
            .segments
            .iter()
            .position(|s| s.station == station)
            .ok_or(ChainError::StationNotFound(station))?;
        let ending = self.segments.remove(idx);

        let follower = self
            .segments
            .iter()
            .position(|s| s.prev == Some(station));

        match follower {
            // Tail: the segment ending at `station` was the only one
            // touching it.
            None => {}
            Some(si) if ending.is_head() => {
                // Head: the follower becomes the new head.
                self.segments[si].prev = None;
            }
            Some(si) => {
                // Interior: merge the two touching segments, summing weights.
                let succ = self.segments.remove(si);
                self.segments.push(LineSegment::new(
                    ending.prev,
                    succ.station,
                    ending.distance + succ.distance,
                    ending.duration + succ.duration,
                ));
            }
        }

        Ok(())
    }

    /// The ordered station sequence implied by the chain, head to tail.
    ///
    /// Walks from the head segment following successor links, one step per
    /// segment at most. A missing head, shared predecessor, cycle, or
    /// dangling link means a prior mutation broke the invariant and is
    /// reported as [`ChainError::Corrupted`].
    pub fn ordered_station_ids(&self) -> Result<Vec<StationId>, ChainError> {
        if self.segments.is_empty() {
            return Ok(Vec::new());
        }

        // Predecessor -> segment, for O(1) successor lookup during the walk.
        let mut by_prev: HashMap<Option<StationId>, &LineSegment> =
            HashMap::with_capacity(self.segments.len());
        for seg in &self.segments {
            if by_prev.insert(seg.prev, seg).is_some() {
                return Err(ChainError::Corrupted("two segments share a predecessor"));
            }
        }

        let head = by_prev
            .get(&None)
            .ok_or(ChainError::Corrupted("no head segment"))?;

        let mut order = Vec::with_capacity(self.segments.len());
        let mut current = head.station;
        order.push(current);
        while let Some(next) = by_prev.get(&Some(current)) {
            if order.len() == self.segments.len() {
                return Err(ChainError::Corrupted("cycle in segment chain"));
            }
            current = next.station;
            order.push(current);
        }
        if order.len() != self.segments.len() {
            return Err(ChainError::Corrupted("unreachable segments"));
        }

        Ok(order)
    }
}
