//! Normalized weather documents shared by the aggregator and the dashboard.
//!
//! These are the wire types of `GET /api/weather`. The server serializes them
//! and the dashboard client deserializes the same structs, so field names are
//! camelCase to match the JSON contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Description used when the provider omits one.
pub const DEFAULT_DESCRIPTION: &str = "-";

/// Icon code used when the provider omits one.
pub const DEFAULT_ICON: &str = "01d";

/// Current conditions for the queried city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Air temperature in Celsius
    pub temp: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Wind speed in metres per second
    pub wind_speed: f64,
    /// Short localized description (e.g. "berawan")
    pub description: String,
    /// Provider icon code (e.g. "04d")
    pub icon: String,
}

/// One city-local day of the 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// City-local calendar date (YYYY-MM-DD)
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Lowest minimum temperature across the day's samples
    pub temp_min: f64,
    /// Highest maximum temperature across the day's samples
    pub temp_max: f64,
    /// Description of the sample closest to local noon
    pub description: String,
    /// Icon code of the sample closest to local noon
    pub icon: String,
}

/// The document returned to the dashboard.
///
/// Built fresh for every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// City name as confirmed by the provider
    pub city: String,
    /// ISO 3166 country code, empty when unknown
    pub country: String,
    /// When the report was assembled (ISO 8601, UTC)
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    pub current: CurrentConditions,
    /// Up to 5 days, soonest first, today excluded
    pub forecast: Vec<DailyForecast>,
}
