//! In-memory [`WeatherSource`] for dashboard tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::watch;

use super::client::{FetchError, WeatherSource};
use super::DashboardState;
use crate::models::{CurrentConditions, DailyForecast, WeatherReport};

/// Answers with scripted results first, then with a canned report for
/// whatever city was asked for. Records every call and, once `observe` has
/// been called, the dashboard's `loading` flag at the moment of each call.
#[derive(Default)]
pub(crate) struct FakeSource {
    scripted: Mutex<VecDeque<Result<WeatherReport, FetchError>>>,
    calls: Mutex<Vec<String>>,
    loading_seen: Mutex<Vec<bool>>,
    observed: OnceLock<watch::Receiver<DashboardState>>,
    delay: Option<Duration>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take `delay` to answer every call.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn script(&self, result: Result<WeatherReport, FetchError>) {
        self.scripted.lock().unwrap().push_back(result);
    }

    pub(crate) fn observe(&self, state: watch::Receiver<DashboardState>) {
        let _ = self.observed.set(state);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for FakeSource {
    async fn fetch_report(&self, city: &str) -> Result<WeatherReport, FetchError> {
        self.calls.lock().unwrap().push(city.to_string());
        if let Some(state) = self.observed.get() {
            let loading = state.borrow().loading;
            self.loading_seen.lock().unwrap().push(loading);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(report_for(city)))
    }
}

/// A plausible report for `city` with two forecast days.
pub(crate) fn report_for(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        country: "ID".to_string(),
        updated_at: "2026-03-01T05:00:00Z".parse().unwrap(),
        current: CurrentConditions {
            temp: 30.6,
            feels_like: 35.5,
            humidity: 74.0,
            wind_speed: 3.6,
            description: "awan pecah".to_string(),
            icon: "04d".to_string(),
        },
        forecast: vec![
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                temp_min: 24.4,
                temp_max: 31.5,
                description: "hujan ringan".to_string(),
                icon: "10d".to_string(),
            },
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
                temp_min: 23.6,
                temp_max: 32.2,
                description: "langit cerah".to_string(),
                icon: "01d".to_string(),
            },
        ],
    }
}
