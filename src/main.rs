// Honolulu Climate API v0.1
use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod db;
mod errors;
mod routes;
mod services;

use config::{AppConfig, LogFormat};
use db::queries::SqliteSource;
use routes::AppState;

/// Honolulu Climate API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Honolulu Climate API",
        version = "0.1.0",
        description = "Read-only access to precipitation and temperature observations \
            recorded by the Honolulu, Hawaii weather stations. Trailing-year views are \
            anchored to the latest measurement in the dataset.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Climate", description = "Precipitation, station and temperature queries"),
    ),
    paths(
        routes::health::health_check,
        routes::climate::get_precipitation,
        routes::climate::get_stations,
        routes::climate::get_stations_detail,
        routes::climate::get_station_activity,
        routes::climate::get_tobs,
        routes::climate::get_temperature_from,
        routes::climate::get_temperature_range,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            services::climate::PrecipitationEntry,
            services::climate::TobsEntry,
            services::climate::StationScalar,
            db::models::Station,
            db::models::StationActivity,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "climate_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Invalid configuration");
    init_tracing(config.log_format);

    // Open the read-only connection pool once; every request shares it.
    let source = SqliteSource::connect(&config.database_url, config.max_connections)
        .await
        .expect("Failed to open database");

    let missing = source
        .missing_tables()
        .await
        .expect("Failed to inspect database schema");
    if !missing.is_empty() {
        tracing::error!(
            "Database {} is missing required tables: {}",
            config.database_url,
            missing.join(", ")
        );
        source.close().await;
        std::process::exit(1);
    }
    tracing::info!("Database {} opened read-only", config.database_url);

    let state = AppState::new(Arc::new(source.clone()));

    // CORS — read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server terminated unexpectedly");

    source.close().await;
    tracing::info!("Database pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_climate_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/{start}",
            "/api/v1.0/{start}/{end}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
