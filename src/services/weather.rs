//! Weather report assembly.
//!
//! Queries both OpenWeatherMap endpoints concurrently and reshapes the
//! results into a single [`WeatherReport`]. Nothing is cached: every call
//! builds a fresh report.

use chrono::{SubsecRound, Utc};

use crate::errors::AppError;
use crate::models::WeatherReport;
use crate::services::forecast::bucket_daily_forecast;
use crate::services::openweather::{
    ensure_success, parse_current, parse_forecast, Endpoint, OpenWeatherClient,
};

/// Build a report for an already-validated (trimmed, non-empty) city name.
///
/// Both upstream requests are issued together and neither result is used
/// until both have settled. Statuses are checked current-first, so when both
/// fail the current-conditions error is the one reported. No partial report
/// is ever returned.
pub async fn build_report(
    client: &OpenWeatherClient,
    city: &str,
) -> Result<WeatherReport, AppError> {
    let (current, forecast) = futures::future::join(
        client.send(Endpoint::Current, city),
        client.send(Endpoint::Forecast, city),
    )
    .await;

    // A transport failure on either call wins over any status error.
    let (current, forecast) = (current?, forecast?);
    let current = ensure_success(current).await?;
    let forecast = ensure_success(forecast).await?;

    let (observation, samples) =
        futures::future::try_join(parse_current(current), parse_forecast(forecast)).await?;

    let now = observation
        .observed_at
        .unwrap_or_else(|| Utc::now().timestamp());
    let daily = bucket_daily_forecast(&samples, observation.timezone_offset, now);

    tracing::debug!(
        "Built report for '{}' ({}): {} samples -> {} forecast days",
        observation.city,
        observation.country,
        samples.len(),
        daily.len()
    );

    Ok(WeatherReport {
        city: observation.city,
        country: observation.country,
        // Millisecond precision on the wire
        updated_at: Utc::now().trunc_subsecs(3),
        current: observation.conditions,
        forecast: daily,
    })
}
