//! Climate query engine.
//!
//! Turns measurement and station rows into the four API views. Relative date
//! math is anchored to the latest measurement in the dataset, not to the
//! wall clock, so a historical snapshot keeps answering "the last year" of
//! its own data.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::models::{Station, StationActivity};
use crate::db::ClimateSource;
use crate::errors::AppError;

/// Storage and wire format of measurement dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window. Fixed days, leap years are not special-cased.
const LOOKBACK_DAYS: i64 = 365;

/// One precipitation reading.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrecipitationEntry {
    /// Observation date (YYYY-MM-DD)
    pub date: String,
    /// Precipitation amount
    pub precipitation: f64,
}

/// One temperature observation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TobsEntry {
    /// Observation date (YYYY-MM-DD)
    pub date: String,
    /// Observed temperature
    pub tobs: f64,
}

/// A single scalar of the flattened station listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StationScalar {
    Integer(i64),
    Text(String),
    Number(f64),
}

/// `[min, avg, max]` of `tobs`. Every element is null when nothing matched.
pub type TemperatureSummary = [Option<f64>; 3];

/// Lower bound of the trailing-year window: latest measurement date minus 365 days.
pub async fn previous_year(source: &dyn ClimateSource) -> Result<NaiveDate, AppError> {
    let latest = source
        .latest_measurement_date()
        .await?
        .ok_or_else(|| AppError::DataIntegrity("no measurements recorded".to_string()))?;

    let anchor = parse_date(&latest).ok_or_else(|| {
        AppError::DataIntegrity(format!("latest measurement date '{}' is not YYYY-MM-DD", latest))
    })?;

    let bound = anchor
        .checked_sub_signed(Duration::days(LOOKBACK_DAYS))
        .ok_or_else(|| {
            AppError::DataIntegrity(format!("latest measurement date '{}' is out of range", latest))
        })?;
    tracing::debug!("Anchor date {} gives lookback bound {}", anchor, bound);
    Ok(bound)
}

/// Strict `YYYY-MM-DD`: four-digit year, two-digit month and day.
///
/// chrono's `%Y` on its own also accepts short and signed years.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Precipitation readings from the trailing year. NULL readings are dropped.
pub async fn precipitation(
    source: &dyn ClimateSource,
) -> Result<Vec<PrecipitationEntry>, AppError> {
    let since = format_date(previous_year(source).await?);
    let rows = source.precipitation_since(&since).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            row.prcp.map(|precipitation| PrecipitationEntry {
                date: row.date,
                precipitation,
            })
        })
        .collect())
}

/// Every station, one typed record each.
pub async fn stations_detail(source: &dyn ClimateSource) -> Result<Vec<Station>, AppError> {
    Ok(source.stations().await?)
}

/// Stations flattened into `[id, code, name, lat, lon, elevation, id, ...]`.
pub async fn stations(source: &dyn ClimateSource) -> Result<Vec<StationScalar>, AppError> {
    let stations = source.stations().await?;
    Ok(flatten_stations(stations))
}

fn flatten_stations(stations: Vec<Station>) -> Vec<StationScalar> {
    stations
        .into_iter()
        .flat_map(|s| {
            [
                StationScalar::Integer(s.id),
                StationScalar::Text(s.station),
                StationScalar::Text(s.name),
                StationScalar::Number(s.latitude),
                StationScalar::Number(s.longitude),
                StationScalar::Number(s.elevation),
            ]
        })
        .collect()
}

/// Stations ranked by number of measurements.
pub async fn station_activity(
    source: &dyn ClimateSource,
) -> Result<Vec<StationActivity>, AppError> {
    Ok(source.station_activity().await?)
}

/// Station code with the most measurements.
pub async fn most_active_station(source: &dyn ClimateSource) -> Result<String, AppError> {
    source
        .station_activity()
        .await?
        .into_iter()
        .next()
        .map(|a| a.station)
        .ok_or(AppError::NoStations)
}

/// Trailing-year temperature observations of the most active station.
pub async fn tobs(source: &dyn ClimateSource) -> Result<Vec<TobsEntry>, AppError> {
    let station = most_active_station(source).await?;
    let since = format_date(previous_year(source).await?);
    tracing::debug!("Most active station is {}", station);

    let rows = source.station_tobs_since(&station, &since).await?;
    Ok(rows
        .into_iter()
        .map(|row| TobsEntry {
            date: row.date,
            tobs: row.tobs,
        })
        .collect())
}

/// `[min, avg, max]` of `tobs` for `start <= date` and, if given, `date <= end`.
///
/// Bounds are compared as strings and are not validated. A malformed bound
/// matches nothing and yields `[null, null, null]`.
pub async fn temperature_stats(
    source: &dyn ClimateSource,
    start: &str,
    end: Option<&str>,
) -> Result<TemperatureSummary, AppError> {
    for bound in std::iter::once(start).chain(end) {
        if parse_date(bound).is_none() {
            tracing::debug!("Temperature range bound '{}' is not YYYY-MM-DD", bound);
        }
    }

    let stats = source.temperature_stats(start, end).await?;
    Ok([stats.min, stats.avg, stats.max])
}
