//! Pure mapping from render state to display text. No I/O happens here;
//! callers decide where the text goes.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::forecast::{IconScale, daily_cards, icon_url};
use crate::model::WeatherReport;
use crate::state::RenderState;

pub fn render(state: &RenderState) -> String {
    match state {
        RenderState::Idle => "Enter a city name to look up the weather.".to_string(),
        RenderState::Loading => "Fetching weather...".to_string(),
        RenderState::Error { message, .. } => format!("! {message}"),
        RenderState::Result(report) => render_report(report),
    }
}

fn render_report(report: &WeatherReport) -> String {
    let current = &report.current;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}, {}", current.city, current.country);
    let _ = writeln!(out, "{}", format_fetch_time(&current.fetched_at));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}°C  {}",
        round(current.temperature_c),
        current.description
    );
    let _ = writeln!(out, "  {}", icon_url(&current.icon, IconScale::Large));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Feels like: {}°C    Humidity: {}%    Wind: {} m/s    Pressure: {} hPa",
        round(current.feels_like_c),
        current.humidity_pct,
        current.wind_speed_mps,
        current.pressure_hpa
    );

    let cards = daily_cards(&report.entries);
    if !cards.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Forecast:");
        for card in &cards {
            let _ = writeln!(
                out,
                "  {:<4}{:<8}{:>4}°C  {}",
                card.day, card.date, card.temperature_c, card.description
            );
        }
    }

    out
}

/// "Saturday, August 29, 2026 14:03", matching the header of the display.
fn format_fetch_time(at: &DateTime<Local>) -> String {
    at.format("%A, %B %-d, %Y %H:%M").to_string()
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::model::{CurrentConditions, ForecastEntry};
    use crate::state::Session;
    use chrono::Utc;

    fn report() -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                city: "London".to_string(),
                country: "GB".to_string(),
                fetched_at: Local.with_ymd_and_hms(2026, 8, 29, 14, 3, 0).unwrap(),
                temperature_c: 21.4,
                feels_like_c: 19.6,
                humidity_pct: 65,
                wind_speed_mps: 3.6,
                pressure_hpa: 1012,
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            },
            entries: vec![ForecastEntry {
                timestamp: Utc::now(),
                label: "2026-08-30 12:00:00".to_string(),
                temperature_c: 19.5,
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
        }
    }

    #[test]
    fn idle_and_loading_render_hints() {
        assert_eq!(
            render(&RenderState::Idle),
            "Enter a city name to look up the weather."
        );
        assert_eq!(render(&RenderState::Loading), "Fetching weather...");
    }

    #[test]
    fn error_renders_banner_text() {
        let mut session = Session::new();
        session.reject("Please enter a city name", std::time::Instant::now());

        assert_eq!(render(session.state()), "! Please enter a city name");
    }

    #[test]
    fn report_renders_rounded_values_and_cards() {
        let text = render(&RenderState::Result(report()));

        assert!(text.contains("London, GB"));
        assert!(text.contains("Saturday, August 29, 2026 14:03"));
        assert!(text.contains("21°C  scattered clouds"));
        assert!(text.contains("https://openweathermap.org/img/wn/03d@4x.png"));
        assert!(text.contains("Feels like: 20°C"));
        assert!(text.contains("Humidity: 65%"));
        assert!(text.contains("Wind: 3.6 m/s"));
        assert!(text.contains("Pressure: 1012 hPa"));
        assert!(text.contains("Sun"));
        assert!(text.contains("Aug 30"));
        assert!(text.contains("20°C  light rain"));
    }

    #[test]
    fn report_without_noon_entries_omits_forecast_strip() {
        let mut r = report();
        r.entries.clear();

        let text = render(&RenderState::Result(r));
        assert!(!text.contains("Forecast:"));
    }
}
