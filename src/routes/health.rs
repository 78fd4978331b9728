use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::routes::weather::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status ("ok" when healthy, "degraded" when no API key is configured)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether an OpenWeatherMap API key is configured
    pub provider_configured: bool,
}

/// Health check endpoint.
///
/// Returns the API status and version. Reports "degraded" (still 200) when
/// the OpenWeatherMap key is missing, since every weather request would then
/// fail with 500.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let configured = state.openweather.is_some();

    Json(HealthResponse {
        status: if configured {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider_configured: configured,
    })
}
