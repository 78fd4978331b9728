//! Weather dashboard.
//!
//! Holds the view state of the dashboard (search box, active city, latest
//! report, loading flag, error text) and the one fetch path that both manual
//! searches and the auto-refresh timer go through. State lives in a
//! `tokio::sync::watch` channel so views can re-render on every change and
//! the refresh task can notice when the active city moves.
//!
//! Concurrent fetches are not de-duplicated: whichever response lands last
//! wins.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

pub mod client;
pub mod refresh;
pub mod view;

#[cfg(test)]
pub(crate) mod fake;

use crate::models::WeatherReport;
use client::WeatherSource;
use refresh::{RefreshTask, AUTO_REFRESH_INTERVAL};

/// City loaded when the dashboard is first mounted.
pub const DEFAULT_CITY: &str = "Jakarta";

pub const MSG_EMPTY_SEARCH: &str = "Masukkan nama kota terlebih dahulu.";
pub const MSG_EMPTY_CITY: &str = "Nama kota tidak boleh kosong.";

/// Whether a fetch shows the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// User-initiated: toggles `loading` around the request.
    Loud,
    /// Background refresh: never touches `loading`, still reports errors.
    Silent,
}

/// Everything the view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Current text of the search box
    pub city_input: String,
    /// Last city confirmed by the aggregator; the refresh timer polls this one
    pub active_city: String,
    pub report: Option<WeatherReport>,
    pub loading: bool,
    pub error_message: Option<String>,
    /// `updatedAt` of the latest successful report
    pub last_updated: Option<DateTime<Utc>>,
}

/// Dashboard controller. Cheap to clone; clones share state.
pub struct Dashboard<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<DashboardState>>,
}

impl<S> Clone for Dashboard<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: WeatherSource + 'static> Dashboard<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_city(source, DEFAULT_CITY)
    }

    /// Start with `city` in the search box and as the active city.
    pub fn with_city(source: Arc<S>, city: &str) -> Self {
        let (state, _) = watch::channel(DashboardState {
            city_input: city.to_string(),
            active_city: city.to_string(),
            ..DashboardState::default()
        });
        Self {
            source,
            state: Arc::new(state),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn set_city_input(&self, text: &str) {
        self.state.send_modify(|s| s.city_input = text.to_string());
    }

    /// Arm the auto-refresh timer and load the initial city.
    ///
    /// The returned handle owns the timer; dropping it stops auto-refresh.
    pub async fn mount(&self) -> RefreshTask {
        let task = RefreshTask::spawn(self.clone(), AUTO_REFRESH_INTERVAL);
        let city = self.state.borrow().active_city.clone();
        self.fetch_weather(&city, FetchMode::Loud).await;
        task
    }

    /// Submit the search box.
    ///
    /// Blank input only sets a validation message; no request is made and
    /// the current report stays.
    pub async fn search(&self) {
        let city = self.state.borrow().city_input.trim().to_string();
        if city.is_empty() {
            self.state
                .send_modify(|s| s.error_message = Some(MSG_EMPTY_SEARCH.to_string()));
            return;
        }
        self.fetch_weather(&city, FetchMode::Loud).await;
    }

    /// Submit the search box unless `shutdown` resolves first.
    ///
    /// Returns `false` when interrupted; the in-flight request is dropped.
    pub async fn search_until<F: Future>(&self, shutdown: F) -> bool {
        tokio::select! {
            _ = self.search() => true,
            _ = shutdown => false,
        }
    }

    /// Fetch a report for `city` and fold the outcome into the state.
    ///
    /// On success the report is replaced wholesale and the active city
    /// becomes the name the aggregator confirmed. On failure only the error
    /// message changes; the previous report stays visible.
    pub async fn fetch_weather(&self, city: &str, mode: FetchMode) {
        if city.is_empty() {
            self.state
                .send_modify(|s| s.error_message = Some(MSG_EMPTY_CITY.to_string()));
            return;
        }

        self.state.send_modify(|s| {
            if mode == FetchMode::Loud {
                s.loading = true;
            }
            s.error_message = None;
        });

        let result = self.source.fetch_report(city).await;

        self.state.send_modify(|s| {
            match result {
                Ok(report) => {
                    tracing::debug!("Loaded weather for '{}' ({:?})", report.city, mode);
                    s.active_city = report.city.clone();
                    s.last_updated = Some(report.updated_at);
                    s.report = Some(report);
                }
                Err(err) => {
                    tracing::debug!("Weather fetch for '{}' failed: {}", city, err);
                    s.error_message = Some(err.to_string());
                }
            }
            if mode == FetchMode::Loud {
                s.loading = false;
            }
        });
    }
}
