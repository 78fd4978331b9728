use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

pub(crate) const MSG_MISSING_API_KEY: &str = "Server belum memiliki OPENWEATHER_API_KEY.";
pub(crate) const MSG_MISSING_CITY: &str = "Parameter city wajib diisi.";
pub(crate) const MSG_CITY_NOT_FOUND: &str = "Kota tidak ditemukan. Coba nama kota lain.";
pub(crate) const MSG_INVALID_API_KEY: &str = "API key OpenWeatherMap tidak valid.";
pub(crate) const MSG_FETCH_FAILED: &str = "Gagal mengambil data cuaca.";
pub(crate) const MSG_UPSTREAM_DISRUPTION: &str =
    "Terjadi gangguan saat mengambil data dari OpenWeatherMap.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The server is missing required configuration (e.g. the API key).
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("City not found")]
    CityNotFound,

    #[error("Upstream rejected the API key")]
    InvalidCredential,

    /// Any other non-success status from the provider.
    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamRejected { status: u16, message: String },

    /// Network or decoding failure talking to the provider.
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    /// Classify a non-success provider status.
    ///
    /// `upstream_message` is the provider's own `message` field, if any; it is
    /// only surfaced for statuses without a fixed mapping.
    pub fn from_upstream_status(status: u16, upstream_message: Option<String>) -> Self {
        match status {
            404 => AppError::CityNotFound,
            401 => AppError::InvalidCredential,
            _ => AppError::UpstreamRejected {
                status,
                message: upstream_message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| MSG_FETCH_FAILED.to_string()),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::CityNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::UpstreamRejected { status, .. } => normalize_upstream_status(*status),
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Only 400/401/404 pass through; every other upstream status is a bad gateway.
fn normalize_upstream_status(status: u16) -> StatusCode {
    match status {
        400 => StatusCode::BAD_REQUEST,
        401 => StatusCode::UNAUTHORIZED,
        404 => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Configuration(detail) => {
                tracing::error!("Configuration error: {}", detail);
                MSG_MISSING_API_KEY.to_string()
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::CityNotFound => MSG_CITY_NOT_FOUND.to_string(),
            AppError::InvalidCredential => {
                tracing::warn!("OpenWeatherMap rejected the configured API key");
                MSG_INVALID_API_KEY.to_string()
            }
            AppError::UpstreamRejected { status, message } => {
                tracing::warn!("OpenWeatherMap returned HTTP {}: {}", status, message);
                message.clone()
            }
            AppError::ExternalServiceError(detail) => {
                tracing::error!("OpenWeatherMap request failed: {}", detail);
                MSG_UPSTREAM_DISRUPTION.to_string()
            }
        };

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}
