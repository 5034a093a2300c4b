//! Data source for measurement and station records.
//!
//! The query engine only talks to [`ClimateSource`]; [`queries::SqliteSource`]
//! is the production implementation over a read-only SQLite pool.

use async_trait::async_trait;

pub mod models;
pub mod queries;

use models::{PrecipitationRow, Station, StationActivity, TemperatureStats, TobsRow};

/// Read capabilities the query engine needs from the store.
///
/// Date arguments are `YYYY-MM-DD` strings compared lexically, the same way
/// the `date` column is stored.
#[async_trait]
pub trait ClimateSource: Send + Sync {
    /// Maximum `date` across all measurements, `None` when the table is empty.
    async fn latest_measurement_date(&self) -> Result<Option<String>, sqlx::Error>;

    /// `(date, prcp)` for every measurement with `date >= since`, in storage order.
    async fn precipitation_since(&self, since: &str) -> Result<Vec<PrecipitationRow>, sqlx::Error>;

    /// Measurement count per station, busiest first, ties by station code ascending.
    async fn station_activity(&self) -> Result<Vec<StationActivity>, sqlx::Error>;

    /// `(date, tobs)` for one station's measurements with `date >= since`.
    async fn station_tobs_since(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TobsRow>, sqlx::Error>;

    /// MIN/AVG/MAX of `tobs` for `date >= start` and, if given, `date <= end`.
    async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, sqlx::Error>;

    /// Every station row, ordered by id.
    async fn stations(&self) -> Result<Vec<Station>, sqlx::Error>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
