//! Text rendering of the dashboard.
//!
//! Labels are Indonesian, matching the locale the aggregator requests from
//! OpenWeatherMap. Temperatures are shown as whole degrees.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Utc};
use std::fmt::Write;

use super::refresh::AUTO_REFRESH_INTERVAL;
use super::DashboardState;
use crate::models::{CurrentConditions, DailyForecast, WeatherReport};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

const WEEKDAYS: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];
const WEEKDAYS_SHORT: [&str; 7] = ["Sen", "Sel", "Rab", "Kam", "Jum", "Sab", "Min"];
const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// URL of the provider's 2x icon for `icon_code`.
pub fn icon_url(icon_code: &str) -> String {
    format!("{}/{}@2x.png", ICON_BASE_URL, icon_code)
}

/// Round to the nearest whole degree, halves towards +∞ (-2.5 → -2).
pub fn round_degrees(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Upper-case the first character; `-` for empty text.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "-".to_string(),
    }
}

/// Long Indonesian date and time, e.g. "Minggu, 01 Maret 2026 pukul 12.30".
pub fn format_date_time<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    format!(
        "{}, {:02} {} {} pukul {:02}.{:02}",
        WEEKDAYS[value.weekday().num_days_from_monday() as usize],
        value.day(),
        MONTHS[value.month0() as usize],
        value.year(),
        value.hour(),
        value.minute()
    )
}

/// Short Indonesian forecast date, e.g. "Sen, 2 Mar".
pub fn format_forecast_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        WEEKDAYS_SHORT[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS_SHORT[date.month0() as usize]
    )
}

/// Header line describing data freshness, in the viewer's local time.
pub fn updated_label(last_updated: Option<DateTime<Utc>>) -> String {
    match last_updated {
        Some(at) => format!(
            "Terakhir diperbarui: {}",
            format_date_time(&at.with_timezone(&Local))
        ),
        None => "Menunggu data cuaca terbaru...".to_string(),
    }
}

/// Render the whole dashboard.
pub fn render(state: &DashboardState) -> String {
    let mut out = String::new();

    out.push_str("Real-Time Weather\n");
    out.push_str("Prediksi Cuaca Modern\n");
    out.push_str("Cari cuaca terbaru per kota dan pantau prakiraan 5 hari ke depan.\n");
    out.push_str(&updated_label(state.last_updated));
    out.push('\n');

    if state.loading {
        out.push_str("Memuat...\n");
    }
    if let Some(error) = &state.error_message {
        let _ = writeln!(out, "! {}", error);
    }

    out.push('\n');
    render_current_card(&mut out, state.report.as_ref());
    out.push('\n');
    render_forecast_card(
        &mut out,
        state.report.as_ref().map(|r| r.forecast.as_slice()).unwrap_or(&[]),
    );

    out
}

fn render_current_card(out: &mut String, report: Option<&WeatherReport>) {
    out.push_str("== Cuaca Saat Ini ==\n");
    let Some(report) = report else {
        out.push_str("-\n");
        out.push_str("Data cuaca akan muncul setelah pencarian kota.\n");
        return;
    };

    let _ = writeln!(out, "{}, {}", report.city, report.country);
    let CurrentConditions {
        temp,
        feels_like,
        humidity,
        wind_speed,
        description,
        icon,
    } = &report.current;
    let _ = writeln!(
        out,
        "{}°C  {}",
        round_degrees(*temp),
        capitalize(description)
    );
    let _ = writeln!(out, "Ikon: {}", icon_url(icon));
    let _ = writeln!(
        out,
        "Kelembapan: {}%   Angin: {} m/s   Terasa: {}°C",
        humidity,
        wind_speed,
        round_degrees(*feels_like)
    );
}

fn render_forecast_card(out: &mut String, forecast: &[DailyForecast]) {
    let _ = writeln!(
        out,
        "== Prakiraan 5 Hari ==  (Auto-refresh: {} menit)",
        AUTO_REFRESH_INTERVAL.as_secs() / 60
    );
    if forecast.is_empty() {
        out.push_str("Prakiraan akan tampil saat data tersedia.\n");
        return;
    }

    for day in forecast {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {}° / {}°  {}",
            format_forecast_date(day.date),
            capitalize(&day.description),
            round_degrees(day.temp_max),
            round_degrees(day.temp_min),
            icon_url(&day.icon)
        );
    }
}
