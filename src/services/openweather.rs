//! OpenWeatherMap 2.5 client.
//!
//! Two read-only endpoints are used, both queried by city name:
//! - `/weather`: current conditions
//! - `/forecast`: 5 days of 3-hourly samples
//!
//! See: https://openweathermap.org/current and https://openweathermap.org/forecast5

use reqwest::header::{HeaderValue, CACHE_CONTROL};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{CurrentConditions, DEFAULT_DESCRIPTION, DEFAULT_ICON};
use crate::services::forecast::ForecastSample;

pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Unit system requested from the provider.
const UNITS: &str = "metric";

/// Display locale for descriptions.
const LANG: &str = "id";

/// Client for the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Upstream endpoint selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

/// Current conditions plus the metadata needed to bucket the forecast.
#[derive(Debug, Clone)]
pub struct CurrentObservation {
    pub city: String,
    pub country: String,
    /// Seconds east of UTC
    pub timezone_offset: i64,
    /// Observation time (unix seconds), when the provider sent one
    pub observed_at: Option<i64>,
    pub conditions: CurrentConditions,
}

// --- OpenWeatherMap JSON response types ---

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    wind: OwWind,
    #[serde(default)]
    weather: Option<Vec<OwCondition>>,
    sys: Option<OwSys>,
    timezone: Option<i64>,
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Option<Vec<OwForecastItem>>,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Option<Vec<OwCondition>>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

/// Error body returned by the provider on non-success statuses,
/// e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn first_condition(weather: &Option<Vec<OwCondition>>) -> Option<&OwCondition> {
    weather.as_ref().and_then(|w| w.first())
}

impl OpenWeatherClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_API_URL)
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a request to one endpoint without inspecting the status.
    ///
    /// Status checks happen in [`ensure_success`] once both concurrent calls
    /// have settled.
    pub async fn send(
        &self,
        endpoint: Endpoint,
        city: &str,
    ) -> Result<reqwest::Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());

        self.client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", LANG),
            ])
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "OpenWeatherMap /{} request failed: {}",
                    endpoint.path(),
                    e.without_url()
                ))
            })
    }
}

/// Turn a non-success response into a classified [`AppError`].
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // The body may be missing or not JSON at all.
    let message = response
        .json::<OwErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    Err(AppError::from_upstream_status(status.as_u16(), message))
}

/// Decode a `/weather` body.
pub async fn parse_current(response: reqwest::Response) -> Result<CurrentObservation, AppError> {
    let body: OwCurrentResponse = response.json().await.map_err(|e| {
        AppError::ExternalServiceError(format!(
            "OpenWeatherMap /weather JSON parse error: {}",
            e.without_url()
        ))
    })?;

    let condition = first_condition(&body.weather);

    Ok(CurrentObservation {
        city: body.name,
        country: body.sys.and_then(|s| s.country).unwrap_or_default(),
        timezone_offset: body.timezone.unwrap_or(0),
        observed_at: body.dt,
        conditions: CurrentConditions {
            temp: body.main.temp,
            feels_like: body.main.feels_like,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
            description: condition
                .and_then(|c| c.description.clone())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            icon: condition
                .and_then(|c| c.icon.clone())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
        },
    })
}

/// Decode a `/forecast` body into bucketing samples.
pub async fn parse_forecast(response: reqwest::Response) -> Result<Vec<ForecastSample>, AppError> {
    let body: OwForecastResponse = response.json().await.map_err(|e| {
        AppError::ExternalServiceError(format!(
            "OpenWeatherMap /forecast JSON parse error: {}",
            e.without_url()
        ))
    })?;

    Ok(body
        .list
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let condition = first_condition(&item.weather);
            ForecastSample {
                dt: item.dt,
                temp_min: item.main.temp_min,
                temp_max: item.main.temp_max,
                description: condition.and_then(|c| c.description.clone()),
                icon: condition.and_then(|c| c.icon.clone()),
            }
        })
        .collect())
}
