//! Auto-refresh timer.
//!
//! A Tokio task that silently re-fetches the active city every
//! [`AUTO_REFRESH_INTERVAL`]. It watches the dashboard state and restarts its
//! countdown whenever the active city changes, so a fresh search always gets
//! a full period before the next background refresh. The task lives exactly
//! as long as its [`RefreshTask`] handle.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::client::WeatherSource;
use super::{Dashboard, FetchMode};

/// Period between silent refreshes.
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Owner of a running refresh loop. Dropping it aborts the loop.
#[derive(Debug)]
#[must_use = "dropping the RefreshTask stops auto-refresh"]
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn<S: WeatherSource + 'static>(dashboard: Dashboard<S>, period: Duration) -> Self {
        Self {
            handle: tokio::spawn(run_refresh_loop(dashboard, period)),
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_refresh_loop<S: WeatherSource + 'static>(dashboard: Dashboard<S>, period: Duration) {
    let mut updates = dashboard.subscribe();
    let mut city = updates.borrow_and_update().active_city.clone();
    let mut deadline = Instant::now() + period;
    tracing::debug!("Auto-refresh armed for '{}' every {:?}", city, period);

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => {
                deadline += period;
                if city.is_empty() {
                    continue;
                }
                tracing::info!("Auto-refreshing weather for '{}'", city);
                dashboard.fetch_weather(&city, FetchMode::Silent).await;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let active = updates.borrow_and_update().active_city.clone();
                if active != city {
                    tracing::debug!("Active city changed to '{}', re-arming auto-refresh", active);
                    city = active;
                    deadline = Instant::now() + period;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::client::FetchError;
    use crate::dashboard::fake::FakeSource;
    use std::sync::Arc;

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_silent_refresh_failure_keeps_last_report() {
        let source = Arc::new(FakeSource::new());
        let dashboard = Dashboard::with_city(Arc::clone(&source), "Bandung");
        source.observe(dashboard.subscribe());
        dashboard.search().await;

        let _task = RefreshTask::spawn(dashboard.clone(), AUTO_REFRESH_INTERVAL);
        source.script(Err(FetchError::Rejected(
            "Gagal mengambil data cuaca.".to_string(),
        )));

        tokio::time::sleep(AUTO_REFRESH_INTERVAL + MINUTE).await;

        assert_eq!(source.calls(), vec!["Bandung", "Bandung"]);
        // Manual search showed the indicator; the timed refresh did not
        assert_eq!(source.loading_seen(), vec![true, false]);

        let state = dashboard.snapshot();
        assert!(!state.loading);
        assert_eq!(
            state.error_message.as_deref(),
            Some("Gagal mengambil data cuaca.")
        );
        assert_eq!(state.report.unwrap().city, "Bandung");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_refresh_before_period() {
        let source = Arc::new(FakeSource::new());
        let dashboard = Dashboard::new(Arc::clone(&source));
        let _task = dashboard.mount().await;

        tokio::time::sleep(9 * MINUTE).await;
        assert_eq!(source.calls(), vec!["Jakarta"]);

        tokio::time::sleep(2 * MINUTE).await;
        assert_eq!(source.calls(), vec!["Jakarta", "Jakarta"]);

        tokio::time::sleep(10 * MINUTE).await;
        assert_eq!(source.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearms_when_active_city_changes() {
        let source = Arc::new(FakeSource::new());
        let dashboard = Dashboard::new(Arc::clone(&source));
        let _task = dashboard.mount().await;

        tokio::time::sleep(5 * MINUTE).await;
        dashboard.set_city_input("Bandung");
        dashboard.search().await;

        // The first 10-minute mark passes without a refresh
        tokio::time::sleep(6 * MINUTE).await;
        assert_eq!(source.calls(), vec!["Jakarta", "Bandung"]);

        // 10 minutes after the city changed
        tokio::time::sleep(5 * MINUTE).await;
        assert_eq!(source.calls(), vec!["Jakarta", "Bandung", "Bandung"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_task_stops_refresh() {
        let source = Arc::new(FakeSource::new());
        let dashboard = Dashboard::new(Arc::clone(&source));
        let task = dashboard.mount().await;

        drop(task);
        tokio::time::sleep(30 * MINUTE).await;

        assert_eq!(source.calls(), vec!["Jakarta"]);
    }
}
