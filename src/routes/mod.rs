use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::db::ClimateSource;

pub mod climate;
pub mod health;
pub mod index;

/// Shared application state: the injected data source.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ClimateSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn ClimateSource>) -> Self {
        Self { source }
    }
}

/// All API routes. Static paths take precedence over the `:start` captures.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/api/v1.0/health", get(health::health_check))
        .route("/api/v1.0/precipitation", get(climate::get_precipitation))
        .route("/api/v1.0/stations", get(climate::get_stations))
        .route(
            "/api/v1.0/stations/detail",
            get(climate::get_stations_detail),
        )
        .route(
            "/api/v1.0/stations/activity",
            get(climate::get_station_activity),
        )
        .route("/api/v1.0/tobs", get(climate::get_tobs))
        .route("/api/v1.0/:start", get(climate::get_temperature_from))
        .route(
            "/api/v1.0/:start/:end",
            get(climate::get_temperature_range),
        )
        .with_state(state)
}
