use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The dataset's anchor date is missing or malformed.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// No measurements exist, so no station can be ranked.
    #[error("No stations have recorded measurements")]
    NoStations,

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::DataIntegrity(msg) => {
                tracing::error!("Data integrity error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::NoStations => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::DataSourceUnavailable(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal database error".to_string(),
                )
            }
        };

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}
