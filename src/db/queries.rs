use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::models::{PrecipitationRow, Station, StationActivity, TemperatureStats, TobsRow};
use super::ClimateSource;

/// Tables the service reads. The schema is owned by whoever produced the dataset.
pub const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// [`ClimateSource`] backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a read-only pool on the database at `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Names from [`REQUIRED_TABLES`] that do not exist in the database.
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>, sqlx::Error> {
        let present: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await?;

        Ok(REQUIRED_TABLES
            .into_iter()
            .filter(|table| !present.iter().any(|name| name == table))
            .collect())
    }

    /// Close every pooled connection. Pending queries are allowed to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ClimateSource for SqliteSource {
    async fn latest_measurement_date(&self) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await
    }

    async fn precipitation_since(&self, since: &str) -> Result<Vec<PrecipitationRow>, sqlx::Error> {
        sqlx::query_as::<_, PrecipitationRow>(
            "SELECT date, prcp FROM measurement WHERE date >= ? ORDER BY rowid",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
    }

    async fn station_activity(&self) -> Result<Vec<StationActivity>, sqlx::Error> {
        sqlx::query_as::<_, StationActivity>(
            "SELECT station, COUNT(*) AS count
             FROM measurement
             GROUP BY station
             ORDER BY count DESC, station ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn station_tobs_since(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TobsRow>, sqlx::Error> {
        sqlx::query_as::<_, TobsRow>(
            "SELECT date, tobs FROM measurement
             WHERE station = ? AND date >= ?
             ORDER BY rowid",
        )
        .bind(station)
        .bind(since)
        .fetch_all(&self.pool)
        .await
    }

    async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, sqlx::Error> {
        // A NULL end leaves the range open above.
        sqlx::query_as::<_, TemperatureStats>(
            "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max
             FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
    }

    async fn stations(&self) -> Result<Vec<Station>, sqlx::Error> {
        sqlx::query_as::<_, Station>(
            "SELECT id, station, name, latitude, longitude, elevation FROM station ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{sample_source, seeded_source, SAMPLE_STATIONS};

    #[tokio::test]
    async fn test_latest_measurement_date() {
        let source = sample_source().await;
        let latest = source.latest_measurement_date().await.unwrap();
        assert_eq!(latest.as_deref(), Some("2017-08-23"));
    }

    #[tokio::test]
    async fn test_latest_measurement_date_empty() {
        let source = seeded_source(&[], &[]).await;
        assert_eq!(source.latest_measurement_date().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_precipitation_since_keeps_nulls_and_order() {
        let source = sample_source().await;
        let rows = source.precipitation_since("2017-08-21").await.unwrap();
        assert_eq!(
            rows,
            vec![
                PrecipitationRow {
                    date: "2017-08-23".into(),
                    prcp: Some(0.0)
                },
                PrecipitationRow {
                    date: "2017-08-23".into(),
                    prcp: None
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_station_activity_breaks_ties_by_code() {
        let source = seeded_source(
            &[
                ("S9", "2017-01-01", None, 70.0),
                ("S3", "2017-01-01", None, 70.0),
                ("S9", "2017-01-02", None, 71.0),
                ("S3", "2017-01-02", None, 71.0),
                ("S5", "2017-01-02", None, 72.0),
            ],
            &[],
        )
        .await;

        let activity = source.station_activity().await.unwrap();
        let order: Vec<(&str, i64)> = activity
            .iter()
            .map(|a| (a.station.as_str(), a.count))
            .collect();
        assert_eq!(order, vec![("S3", 2), ("S9", 2), ("S5", 1)]);
    }

    #[tokio::test]
    async fn test_station_tobs_since_filters_station_and_date() {
        let source = sample_source().await;
        let rows = source.station_tobs_since("S1", "2017-08-21").await.unwrap();
        assert_eq!(
            rows,
            vec![TobsRow {
                date: "2017-08-23".into(),
                tobs: 80.0
            }]
        );
    }

    #[tokio::test]
    async fn test_temperature_stats_closed_range() {
        let source = sample_source().await;
        let stats = source
            .temperature_stats("2017-08-20", Some("2017-08-23"))
            .await
            .unwrap();
        assert_eq!(stats.min, Some(79.0));
        assert_eq!(stats.max, Some(82.0));
        assert!((stats.avg.unwrap() - 241.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_temperature_stats_open_range() {
        let source = sample_source().await;
        let stats = source.temperature_stats("2017-08-21", None).await.unwrap();
        assert_eq!(stats.min, Some(80.0));
        assert_eq!(stats.avg, Some(81.0));
        assert_eq!(stats.max, Some(82.0));
    }

    #[tokio::test]
    async fn test_temperature_stats_no_match_is_all_null() {
        let source = sample_source().await;
        let stats = source.temperature_stats("2018-01-01", None).await.unwrap();
        assert_eq!(
            stats,
            TemperatureStats {
                min: None,
                avg: None,
                max: None
            }
        );
    }

    #[tokio::test]
    async fn test_stations_ordered_by_id() {
        let source = sample_source().await;
        let stations = source.stations().await.unwrap();
        assert_eq!(stations.len(), SAMPLE_STATIONS.len());
        assert_eq!(stations[0].station, "S1");
        assert_eq!(stations[1].elevation, 14.6);
    }

    #[tokio::test]
    async fn test_missing_tables() {
        let source = sample_source().await;
        assert!(source.missing_tables().await.unwrap().is_empty());

        sqlx::query("DROP TABLE station")
            .execute(&source.pool)
            .await
            .unwrap();
        assert_eq!(source.missing_tables().await.unwrap(), vec!["station"]);
    }

    #[tokio::test]
    async fn test_ping_fails_after_close() {
        let source = sample_source().await;
        assert!(source.ping().await.is_ok());
        source.close().await;
        assert!(source.ping().await.is_err());
    }
}
