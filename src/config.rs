/// Aggregator server configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap API key. Missing is allowed at startup; weather
    /// requests then fail with 500 until it is provided.
    pub openweather_api_key: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
        }
    }
}

/// Terminal dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the aggregator (without the `/api/weather` path).
    pub api_url: String,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("SKYCAST_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
        }
    }
}
