//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::{ChainError, LineId, StationId};
use crate::graph::PathError;
use crate::service::ServiceError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", post(create_station).get(list_stations))
        .route("/stations/:id", delete(delete_station))
        .route("/lines", post(create_line).get(list_lines))
        .route("/lines/detail", get(whole_lines))
        .route(
            "/lines/:id",
            get(find_line).put(update_line).delete(delete_line),
        )
        .route("/lines/:id/stations", post(add_line_station))
        .route(
            "/lines/:line_id/stations/:station_id",
            delete(remove_line_station),
        )
        .route("/paths", get(find_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), AppError> {
    let station = state.service.create_station(&req.name)?;
    Ok((
        StatusCode::CREATED,
        Json(StationResponse::from_station(&station)),
    ))
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state
        .service
        .list_stations()
        .iter()
        .map(StationResponse::from_station)
        .collect();
    Json(stations)
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.service.delete_station(StationId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<LineRequest>,
) -> (StatusCode, Json<LineResponse>) {
    let line = state
        .service
        .create_line(&req.name, req.start_time, req.end_time, req.interval_mins);
    (StatusCode::CREATED, Json(LineResponse::from_line(&line)))
}

async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineResponse>> {
    let lines = state
        .service
        .list_lines()
        .iter()
        .map(LineResponse::from_line)
        .collect();
    Json(lines)
}

/// A line's metadata plus its stations in chain order.
async fn find_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineDetailResponse>, AppError> {
    let detail = state.service.find_line_with_stations(LineId(id))?;
    Ok(Json(LineDetailResponse::from_detail(&detail)))
}

async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<LineRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let line = state.service.update_line(
        LineId(id),
        &req.name,
        req.start_time,
        req.end_time,
        req.interval_mins,
    )?;
    Ok(Json(LineResponse::from_line(&line)))
}

async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.service.delete_line(LineId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every line with its stations in chain order.
async fn whole_lines(
    State(state): State<AppState>,
) -> Result<Json<Vec<LineDetailResponse>>, AppError> {
    let details = state.service.whole_lines()?;
    Ok(Json(
        details.iter().map(LineDetailResponse::from_detail).collect(),
    ))
}

/// Insert a station into a line's chain.
async fn add_line_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<AddLineStationRequest>,
) -> Result<(StatusCode, Json<LineStationsResponse>), AppError> {
    let order = state.service.add_line_station(
        LineId(id),
        req.prev_station_id.map(StationId),
        StationId(req.station_id),
        req.distance,
        req.duration,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(LineStationsResponse {
            station_ids: order.into_iter().map(|s| s.0).collect(),
        }),
    ))
}

/// Remove a station from a line's chain.
async fn remove_line_station(
    State(state): State<AppState>,
    Path((line_id, station_id)): Path<(u64, u64)>,
) -> Result<Json<LineStationsResponse>, AppError> {
    let order = state
        .service
        .remove_line_station(LineId(line_id), StationId(station_id))?;
    Ok(Json(LineStationsResponse {
        station_ids: order.into_iter().map(|s| s.0).collect(),
    }))
}

/// Shortest path between two stations under the requested policy.
async fn find_path(
    State(state): State<AppState>,
    Query(req): Query<PathRequest>,
) -> Result<Json<PathResponse>, AppError> {
    let detail = state.service.find_shortest_path(
        StationId(req.source),
        StationId(req.target),
        req.path_type,
    )?;
    Ok(Json(PathResponse::from_detail(&detail)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::LineNotFound(_)
            | ServiceError::StationNotFound(_)
            | ServiceError::Path(PathError::UnknownStation(_)) => AppError::NotFound { message },
            ServiceError::DuplicateStationName(_)
            | ServiceError::Path(PathError::NoPathFound { .. })
            | ServiceError::Chain(ChainError::DuplicateStation(_))
            | ServiceError::Chain(ChainError::StationNotFound(_)) => {
                AppError::BadRequest { message }
            }
            ServiceError::Chain(ChainError::Corrupted(_)) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let not_found = AppError::from(ServiceError::LineNotFound(LineId(1)));
        assert!(matches!(not_found, AppError::NotFound { .. }));

        let unknown = AppError::from(ServiceError::Path(PathError::UnknownStation(StationId(9))));
        assert!(matches!(unknown, AppError::NotFound { .. }));

        let no_path = AppError::from(ServiceError::Path(PathError::NoPathFound {
            source: StationId(1),
            target: StationId(2),
        }));
        assert!(matches!(no_path, AppError::BadRequest { .. }));

        let duplicate =
            AppError::from(ServiceError::Chain(ChainError::DuplicateStation(StationId(2))));
        assert!(matches!(duplicate, AppError::BadRequest { .. }));

        let corrupted = AppError::from(ServiceError::Chain(ChainError::Corrupted("no head")));
        assert!(matches!(corrupted, AppError::Internal { .. }));
    }
}
