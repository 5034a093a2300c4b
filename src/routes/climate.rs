//! Climate HTTP endpoints.
//!
//! - GET /api/v1.0/precipitation
//! - GET /api/v1.0/stations
//! - GET /api/v1.0/stations/detail
//! - GET /api/v1.0/stations/activity
//! - GET /api/v1.0/tobs
//! - GET /api/v1.0/:start
//! - GET /api/v1.0/:start/:end

use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::db::models::{Station, StationActivity};
use crate::errors::{AppError, ErrorResponse};
use crate::services::climate::{self, PrecipitationEntry, StationScalar, TobsEntry};

/// Precipitation readings from the last year of data.
///
/// The year is counted back 365 days from the latest measurement in the
/// dataset. Readings without a precipitation value are omitted.
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "Climate",
    responses(
        (status = 200, description = "Precipitation readings", body = Vec<PrecipitationEntry>),
        (status = 500, description = "Dataset has no valid latest date", body = ErrorResponse),
    )
)]
pub async fn get_precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationEntry>>, AppError> {
    let entries = climate::precipitation(state.source.as_ref()).await?;
    Ok(Json(entries))
}

/// All stations as one flat list: id, code, name, latitude, longitude,
/// elevation, repeated per station.
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "Climate",
    responses(
        (status = 200, description = "Flattened station attributes", body = Vec<StationScalar>),
    )
)]
pub async fn get_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationScalar>>, AppError> {
    let flat = climate::stations(state.source.as_ref()).await?;
    Ok(Json(flat))
}

/// All stations, one object each.
#[utoipa::path(
    get,
    path = "/api/v1.0/stations/detail",
    tag = "Climate",
    responses(
        (status = 200, description = "Station records", body = Vec<Station>),
    )
)]
pub async fn get_stations_detail(
    State(state): State<AppState>,
) -> Result<Json<Vec<Station>>, AppError> {
    let stations = climate::stations_detail(state.source.as_ref()).await?;
    Ok(Json(stations))
}

/// Stations ranked by number of recorded measurements, busiest first.
#[utoipa::path(
    get,
    path = "/api/v1.0/stations/activity",
    tag = "Climate",
    responses(
        (status = 200, description = "Measurement count per station", body = Vec<StationActivity>),
    )
)]
pub async fn get_station_activity(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationActivity>>, AppError> {
    let activity = climate::station_activity(state.source.as_ref()).await?;
    Ok(Json(activity))
}

/// Temperature observations of the most active station over the last year of data.
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "Climate",
    responses(
        (status = 200, description = "Temperature observations", body = Vec<TobsEntry>),
        (status = 404, description = "No measurements recorded", body = ErrorResponse),
        (status = 500, description = "Dataset has no valid latest date", body = ErrorResponse),
    )
)]
pub async fn get_tobs(State(state): State<AppState>) -> Result<Json<Vec<TobsEntry>>, AppError> {
    let entries = climate::tobs(state.source.as_ref()).await?;
    Ok(Json(entries))
}

/// Minimum, average and maximum temperature from `start` onwards.
///
/// Returns `[null, null, null]` when no measurement matches, including when
/// `start` is not a YYYY-MM-DD date.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "Climate",
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
    ),
    responses(
        (status = 200, description = "[min, avg, max]", body = Vec<Option<f64>>),
    )
)]
pub async fn get_temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<Option<f64>>>, AppError> {
    let summary = climate::temperature_stats(state.source.as_ref(), &start, None).await?;
    Ok(Json(summary.to_vec()))
}

/// Minimum, average and maximum temperature between `start` and `end`, inclusive.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "Climate",
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
        ("end" = String, Path, description = "End date (YYYY-MM-DD), inclusive"),
    ),
    responses(
        (status = 200, description = "[min, avg, max]", body = Vec<Option<f64>>),
    )
)]
pub async fn get_temperature_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<Option<f64>>>, AppError> {
    let summary =
        climate::temperature_stats(state.source.as_ref(), &start, Some(&end)).await?;
    Ok(Json(summary.to_vec()))
}
