use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A weather station, one row of the `station` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Station {
    /// Numeric row identifier
    pub id: i64,
    /// External station code (e.g. "USC00519281")
    pub station: String,
    /// Human-readable station name
    pub name: String,
    /// Latitude (WGS84)
    pub latitude: f64,
    /// Longitude (WGS84)
    pub longitude: f64,
    /// Elevation in metres above sea level
    pub elevation: f64,
}

/// `(date, prcp)` projection of a measurement. `prcp` is NULL for some rows.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// `(date, tobs)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TobsRow {
    pub date: String,
    pub tobs: f64,
}

/// Number of measurements recorded by one station.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct StationActivity {
    /// External station code
    pub station: String,
    /// Number of measurement rows for this station
    pub count: i64,
}

/// Result of a single MIN/AVG/MAX aggregate over `tobs`.
///
/// All three are `None` when the filter matched no rows.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}
