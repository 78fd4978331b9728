//! Weather HTTP endpoint.
//!
//! - GET /api/weather?city=NAME

use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::{AppError, ErrorResponse, MSG_MISSING_CITY};
use crate::models::WeatherReport;
use crate::services::openweather::OpenWeatherClient;
use crate::services::weather::build_report;

/// Shared application state for the aggregator endpoints.
#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when no API key is configured; requests then fail with 500.
    pub openweather: Option<OpenWeatherClient>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct WeatherQuery {
    /// City name (e.g. "Jakarta"); surrounding whitespace is ignored
    pub city: Option<String>,
}

impl WeatherQuery {
    /// Build from raw query pairs; the first `city` wins when repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            city: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "city").then_some(value)),
        }
    }
}

/// Get current conditions and a 5-day daily forecast for a city.
///
/// Calls OpenWeatherMap's current-weather and 3-hourly forecast endpoints in
/// parallel and condenses the forecast into one entry per city-local day,
/// starting tomorrow.
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Normalized weather report", body = WeatherReport),
        (status = 400, description = "Missing or empty city", body = ErrorResponse),
        (status = 401, description = "OpenWeatherMap rejected the API key", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Server has no OpenWeatherMap API key", body = ErrorResponse),
        (status = 502, description = "OpenWeatherMap unreachable or failed", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<(HeaderMap, Json<WeatherReport>), AppError> {
    let params = WeatherQuery::from_pairs(pairs);
    let client = state.openweather.as_ref().ok_or_else(|| {
        AppError::Configuration("OPENWEATHER_API_KEY is not set".to_string())
    })?;

    let city = params.city.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() {
        return Err(AppError::BadRequest(MSG_MISSING_CITY.to_string()));
    }

    tracing::info!("Fetching weather for '{}'", city);
    let report = build_report(client, city).await?;

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok((headers, Json(report)))
}
