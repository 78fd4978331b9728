//! Shared fixtures for integration tests.
//!
//! OpenWeatherMap is replaced by a wiremock server; payloads mirror the
//! provider's real JSON shape, trimmed to what the aggregator reads plus a
//! few fields it must ignore.

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast::services::openweather::OpenWeatherClient;
use skycast::AppState;

pub const API_KEY: &str = "test-key";

/// Jakarta is UTC+7.
pub const WIB: i64 = 7 * 3600;

/// Unix timestamp for a Jakarta wall-clock time in March 2026.
pub fn wib_ts(day: u32, hour: u32) -> i64 {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp()
        - WIB
}

pub fn state_for(server: &MockServer) -> AppState {
    AppState {
        openweather: Some(OpenWeatherClient::with_base_url(API_KEY, &server.uri())),
    }
}

/// `/weather` body observed at 10:00 local on 2026-03-01.
pub fn current_body(city: &str) -> Value {
    json!({
        "coord": { "lon": 106.8451, "lat": -6.2146 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "awan pecah", "icon": "04d" }],
        "main": { "temp": 30.6, "feels_like": 35.5, "temp_min": 30.0, "temp_max": 31.0, "pressure": 1008, "humidity": 74 },
        "wind": { "speed": 3.6, "deg": 250 },
        "dt": wib_ts(1, 10),
        "sys": { "country": "ID", "sunrise": wib_ts(1, 6), "sunset": wib_ts(1, 18) },
        "timezone": WIB,
        "name": city,
        "cod": 200
    })
}

fn forecast_item(dt: i64, temp_min: f64, temp_max: f64, description: &str, icon: &str) -> Value {
    json!({
        "dt": dt,
        "main": { "temp": (temp_min + temp_max) / 2.0, "temp_min": temp_min, "temp_max": temp_max, "humidity": 80 },
        "weather": [{ "id": 500, "main": "Rain", "description": description, "icon": icon }],
        "dt_txt": "ignored"
    })
}

/// `/forecast` body: the rest of today plus two full future days.
pub fn forecast_body() -> Value {
    let mut list = vec![
        forecast_item(wib_ts(1, 13), 29.0, 31.0, "awan mendung", "04d"),
        forecast_item(wib_ts(1, 16), 28.0, 30.0, "hujan ringan", "10d"),
    ];
    for hour in [1, 4, 7, 10, 13, 16, 19, 22] {
        let (description, icon) = if hour == 13 {
            ("hujan ringan", "10d")
        } else {
            ("awan tersebar", "03n")
        };
        let (lo, hi) = if hour == 16 { (26.0, 31.6) } else { (24.4, 28.0) };
        list.push(forecast_item(wib_ts(2, hour), lo, hi, description, icon));
    }
    for hour in [1, 4, 7, 10, 13, 16, 19, 22] {
        let (lo, hi) = if hour == 4 { (23.6, 25.0) } else { (25.0, 32.2) };
        let (description, icon) = if hour == 13 {
            ("langit cerah", "01d")
        } else {
            ("berawan", "02n")
        };
        list.push(forecast_item(wib_ts(3, hour), lo, hi, description, icon));
    }
    json!({ "cod": "200", "cnt": list.len(), "list": list, "city": { "timezone": WIB } })
}

/// Mount happy-path responses for `city` on both endpoints.
pub async fn mount_city(server: &MockServer, city: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(city)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}
