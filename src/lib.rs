//! SkyCast: a city weather dashboard.
//!
//! The crate holds both halves of the system:
//! - the forecast aggregator (`routes`, `services`), an axum service that
//!   proxies OpenWeatherMap and returns a compact [`models::WeatherReport`];
//! - the dashboard (`dashboard`), a client that polls the aggregator, keeps
//!   the latest report in memory and renders it as text.

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::weather::AppState;

/// SkyCast API OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkyCast API",
        version = "0.1.0",
        description = "Weather aggregator for the SkyCast dashboard. \
            Queries OpenWeatherMap for current conditions and the 3-hourly \
            forecast of a city, condenses the forecast into daily summaries in \
            the city's local time, and maps provider failures to stable errors.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "Current conditions and 5-day forecast"),
    ),
    paths(routes::health::health_check, routes::weather::get_weather),
    components(schemas(
        routes::health::HealthResponse,
        models::WeatherReport,
        models::CurrentConditions,
        models::DailyForecast,
        errors::ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Build the aggregator router with CORS, tracing and Swagger UI.
pub fn app(state: AppState) -> Router {
    // Read-only API: GET from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/weather", get(routes::weather::get_weather))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
