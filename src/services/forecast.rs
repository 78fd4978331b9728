//! Daily forecast bucketing.
//!
//! OpenWeatherMap's `/forecast` endpoint returns samples in fixed 3-hour
//! steps on UTC boundaries. The dashboard wants one summary per calendar day
//! as seen in the queried city, so every sample is shifted by the city's
//! timezone offset before its date and hour are taken.
//!
//! Pure functions only, no I/O.

use chrono::{DateTime, NaiveDate, Timelike};
use std::collections::BTreeMap;

use crate::models::{DailyForecast, DEFAULT_DESCRIPTION, DEFAULT_ICON};

/// Maximum number of days returned.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Local hour whose sample best represents a day.
const REPRESENTATIVE_HOUR: i64 = 12;

/// A single 3-hour forecast sample, already lifted out of the provider's JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    /// Unix timestamp (seconds, UTC)
    pub dt: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Shift a unix timestamp by `offset_secs` and return the wall-clock datetime.
fn to_city_time(unix_secs: i64, offset_secs: i64) -> Option<chrono::NaiveDateTime> {
    DateTime::from_timestamp(unix_secs.checked_add(offset_secs)?, 0).map(|dt| dt.naive_utc())
}

/// City-local calendar date of a unix timestamp.
pub fn city_date(unix_secs: i64, offset_secs: i64) -> Option<NaiveDate> {
    to_city_time(unix_secs, offset_secs).map(|dt| dt.date())
}

/// City-local hour of day (0-23) of a unix timestamp.
pub fn city_hour(unix_secs: i64, offset_secs: i64) -> Option<u32> {
    to_city_time(unix_secs, offset_secs).map(|dt| dt.hour())
}

/// Collapse 3-hour samples into at most five daily summaries.
///
/// Only dates strictly after the city-local date of `now_unix` are kept, so
/// the result never contains "today". Days are returned in ascending order.
/// Within a day, `temp_min`/`temp_max` are the extremes over every sample,
/// while description and icon come from the sample nearest local noon; on a
/// tie the sample seen first in `samples` wins.
pub fn bucket_daily_forecast(
    samples: &[ForecastSample],
    offset_secs: i64,
    now_unix: i64,
) -> Vec<DailyForecast> {
    let Some(today) = city_date(now_unix, offset_secs) else {
        tracing::warn!(
            "Current timestamp {} is out of range, returning empty forecast",
            now_unix
        );
        return Vec::new();
    };

    // BTreeMap keeps days ordered; each Vec keeps input order.
    let mut days: BTreeMap<NaiveDate, Vec<&ForecastSample>> = BTreeMap::new();
    for sample in samples {
        match city_date(sample.dt, offset_secs) {
            Some(date) if date > today => days.entry(date).or_default().push(sample),
            Some(_) => {}
            None => tracing::warn!("Skipping forecast sample with invalid dt {}", sample.dt),
        }
    }

    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, day_samples)| summarize_day(date, &day_samples, offset_secs))
        .collect()
}

fn summarize_day(date: NaiveDate, samples: &[&ForecastSample], offset_secs: i64) -> DailyForecast {
    let temp_min = samples
        .iter()
        .map(|s| s.temp_min)
        .fold(f64::INFINITY, f64::min);
    let temp_max = samples
        .iter()
        .map(|s| s.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    let representative = pick_representative(samples, offset_secs);

    DailyForecast {
        date,
        temp_min,
        temp_max,
        description: representative
            .and_then(|s| s.description.clone())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        icon: representative
            .and_then(|s| s.icon.clone())
            .unwrap_or_else(|| DEFAULT_ICON.to_string()),
    }
}

/// The sample whose local hour is closest to noon.
///
/// Only a strictly smaller distance replaces the running best.
fn pick_representative<'a>(
    samples: &[&'a ForecastSample],
    offset_secs: i64,
) -> Option<&'a ForecastSample> {
    let noon_distance = |s: &ForecastSample| {
        city_hour(s.dt, offset_secs)
            .map(|h| (i64::from(h) - REPRESENTATIVE_HOUR).abs())
            .unwrap_or(i64::MAX)
    };

    let mut iter = samples.iter().copied();
    let first = iter.next()?;
    let mut best = (first, noon_distance(first));
    for sample in iter {
        let distance = noon_distance(sample);
        if distance < best.1 {
            best = (sample, distance);
        }
    }
    Some(best.0)
}
