//! Data transfer objects for web requests and responses.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Line, Station};
use crate::graph::PathType;
use crate::service::{LineDetail, PathDetail};

/// Request to create a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    /// Display name, unique across the network.
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

impl StationResponse {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.clone(),
        }
    }
}

/// Request to create or update a line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub name: String,

    /// First departure of the day, "HH:MM:SS".
    pub start_time: NaiveTime,

    /// Last departure of the day, "HH:MM:SS".
    pub end_time: NaiveTime,

    /// Minutes between dispatches.
    pub interval_mins: u32,
}

/// Line metadata in responses.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub interval_mins: u32,
}

impl LineResponse {
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id.0,
            name: line.name.clone(),
            start_time: line.start_time,
            end_time: line.end_time,
            interval_mins: line.interval_mins,
        }
    }
}

/// Line metadata plus its stations in chain order.
#[derive(Debug, Serialize)]
pub struct LineDetailResponse {
    #[serde(flatten)]
    pub line: LineResponse,
    pub stations: Vec<StationResponse>,
}

impl LineDetailResponse {
    pub fn from_detail(detail: &LineDetail) -> Self {
        Self {
            line: LineResponse::from_line(&detail.line),
            stations: detail
                .stations
                .iter()
                .map(StationResponse::from_station)
                .collect(),
        }
    }
}

/// Request to insert a station into a line's chain.
#[derive(Debug, Deserialize)]
pub struct AddLineStationRequest {
    /// Station preceding the new one; absent or null inserts a new head.
    #[serde(default)]
    pub prev_station_id: Option<u64>,

    /// The station to insert.
    pub station_id: u64,

    /// Distance of the new segment.
    pub distance: u32,

    /// Duration of the new segment.
    pub duration: u32,
}

/// Updated station order of a line after a chain mutation.
#[derive(Debug, Serialize)]
pub struct LineStationsResponse {
    pub station_ids: Vec<u64>,
}

/// Query parameters for a shortest-path request.
#[derive(Debug, Deserialize)]
pub struct PathRequest {
    /// Source station id.
    pub source: u64,

    /// Target station id.
    pub target: u64,

    /// Weighting policy: "distance" or "duration".
    #[serde(rename = "type")]
    pub path_type: PathType,
}

/// A shortest path with resolved station records.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    pub stations: Vec<StationResponse>,
    pub weight: u64,
}

impl PathResponse {
    pub fn from_detail(detail: &PathDetail) -> Self {
        Self {
            stations: detail
                .stations
                .iter()
                .map(StationResponse::from_station)
                .collect(),
            weight: detail.weight,
        }
    }
}

/// Error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    #[test]
    fn add_line_station_request_with_null_prev() {
        let req: AddLineStationRequest = serde_json::from_str(
            r#"{"prev_station_id": null, "station_id": 4, "distance": 10, "duration": 10}"#,
        )
        .unwrap();
        assert_eq!(req.prev_station_id, None);
        assert_eq!(req.station_id, 4);
    }

    #[test]
    fn add_line_station_request_without_prev_field() {
        let req: AddLineStationRequest =
            serde_json::from_str(r#"{"station_id": 4, "distance": 10, "duration": 10}"#).unwrap();
        assert_eq!(req.prev_station_id, None);
    }

    #[test]
    fn add_line_station_request_with_prev() {
        let req: AddLineStationRequest = serde_json::from_str(
            r#"{"prev_station_id": 1, "station_id": 4, "distance": 10, "duration": 10}"#,
        )
        .unwrap();
        assert_eq!(req.prev_station_id, Some(1));
    }

    #[test]
    fn negative_weights_rejected_by_deserialization() {
        let result: Result<AddLineStationRequest, _> = serde_json::from_str(
            r#"{"station_id": 4, "distance": -1, "duration": 10}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn path_type_parses_lowercase() {
        let req: PathRequest =
            serde_json::from_str(r#"{"source": 1, "target": 2, "type": "distance"}"#).unwrap();
        assert_eq!(req.path_type, PathType::Distance);

        let req: PathRequest =
            serde_json::from_str(r#"{"source": 1, "target": 2, "type": "duration"}"#).unwrap();
        assert_eq!(req.path_type, PathType::Duration);

        let bad: Result<PathRequest, _> =
            serde_json::from_str(r#"{"source": 1, "target": 2, "type": "fastest"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn station_response_serializes() {
        let station = Station::new(StationId(1), "Gangnam");
        let json = serde_json::to_value(StationResponse::from_station(&station)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Gangnam");
    }
}
