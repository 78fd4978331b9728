//! Dashboard → aggregator HTTP client.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL};

use crate::errors::ErrorResponse;
use crate::models::WeatherReport;

/// Fallback when the aggregator rejects a request without a message.
pub const MSG_FETCH_FAILED: &str = "Gagal mengambil data cuaca.";

/// Fallback when the aggregator cannot be reached or answers garbage.
pub const MSG_LOAD_FAILED: &str = "Terjadi kesalahan saat memuat data.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The aggregator answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

/// Anything that can produce a [`WeatherReport`] for a city name.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_report(&self, city: &str) -> Result<WeatherReport, FetchError>;
}

/// [`WeatherSource`] backed by the aggregator's `GET /api/weather`.
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AggregatorClient {
    /// `base_url` is the aggregator origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/weather", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl WeatherSource for AggregatorClient {
    async fn fetch_report(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("city", city)])
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Aggregator request failed: {}", e);
                FetchError::Transport(MSG_LOAD_FAILED.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| MSG_FETCH_FAILED.to_string());
            tracing::debug!("Aggregator returned HTTP {}: {}", status, message);
            return Err(FetchError::Rejected(message));
        }

        response.json::<WeatherReport>().await.map_err(|e| {
            tracing::warn!("Aggregator returned an unreadable report: {}", e);
            FetchError::Transport(MSG_LOAD_FAILED.to_string())
        })
    }
}
