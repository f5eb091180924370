//! Reduces the 3-hour forecast series to one representative card per day.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::ForecastEntry;

/// Entries whose provider label carries this time are the day's sample.
const NOON_LABEL: &str = "12:00:00";

/// At most this many cards per report.
const MAX_CARDS: usize = 5;

const ICON_HOST: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconScale {
    /// Forecast-card size.
    Small,
    /// Hero size for current conditions.
    Large,
}

/// URL of a condition icon on the provider's static image host.
pub fn icon_url(code: &str, scale: IconScale) -> String {
    let suffix = match scale {
        IconScale::Small => "2x",
        IconScale::Large => "4x",
    };
    format!("{ICON_HOST}/{code}@{suffix}.png")
}

/// One day of the forecast strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCard {
    /// Short weekday, e.g. "Sat".
    pub day: String,
    /// Short date, e.g. "Aug 30".
    pub date: String,
    pub icon_url: String,
    pub temperature_c: i64,
    pub description: String,
}

/// Select the noon-aligned sample of each day and map it to a card, keeping
/// series order. Fewer than [`MAX_CARDS`] noon entries produce fewer cards;
/// that is not an error.
pub fn daily_cards(entries: &[ForecastEntry]) -> Vec<DailyCard> {
    entries
        .iter()
        .filter(|entry| entry.label.contains(NOON_LABEL))
        .take(MAX_CARDS)
        .map(card_for)
        .collect()
}

fn card_for(entry: &ForecastEntry) -> DailyCard {
    // The label holds the provider's local date; the raw timestamp would
    // shift days across timezones.
    let local = NaiveDateTime::parse_from_str(&entry.label, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| entry.timestamp.naive_utc());

    DailyCard {
        day: local.format("%a").to_string(),
        date: local.format("%b %-d").to_string(),
        icon_url: icon_url(&entry.icon, IconScale::Small),
        temperature_c: entry.temperature_c.round() as i64,
        description: entry.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(label: &str, temperature_c: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: Utc::now(),
            label: label.to_string(),
            temperature_c,
            description: description.to_string(),
            icon: "10d".to_string(),
        }
    }

    #[test]
    fn five_noon_entries_make_five_ordered_cards() {
        let series = vec![
            entry("2026-08-29 09:00:00", 18.0, "mist"),
            entry("2026-08-29 12:00:00", 21.4, "scattered clouds"),
            entry("2026-08-29 15:00:00", 22.0, "scattered clouds"),
            entry("2026-08-30 12:00:00", 19.6, "light rain"),
            entry("2026-08-31 12:00:00", 17.2, "overcast clouds"),
            entry("2026-09-01 12:00:00", 20.5, "clear sky"),
            entry("2026-09-02 09:00:00", 16.0, "mist"),
            entry("2026-09-02 12:00:00", 23.0, "clear sky"),
        ];

        let cards = daily_cards(&series);

        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].day, "Sat");
        assert_eq!(cards[0].date, "Aug 29");
        assert_eq!(cards[0].temperature_c, 21);
        assert_eq!(cards[0].description, "scattered clouds");
        assert_eq!(cards[1].date, "Aug 30");
        assert_eq!(cards[1].temperature_c, 20);
        assert_eq!(cards[2].date, "Aug 31");
        assert_eq!(cards[3].date, "Sep 1");
        assert_eq!(cards[4].date, "Sep 2");
        assert_eq!(cards[4].temperature_c, 23);
    }

    #[test]
    fn short_series_yields_fewer_cards() {
        let series = vec![
            entry("2026-08-29 12:00:00", 21.0, "clear sky"),
            entry("2026-08-30 12:00:00", 19.0, "light rain"),
            entry("2026-08-31 12:00:00", 18.0, "light rain"),
        ];

        assert_eq!(daily_cards(&series).len(), 3);
    }

    #[test]
    fn off_noon_series_yields_no_cards() {
        let series = vec![
            entry("2026-08-29 09:00:00", 21.0, "clear sky"),
            entry("2026-08-29 15:00:00", 19.0, "light rain"),
        ];

        assert!(daily_cards(&series).is_empty());
    }

    #[test]
    fn icon_urls_by_scale() {
        assert_eq!(
            icon_url("03d", IconScale::Large),
            "https://openweathermap.org/img/wn/03d@4x.png"
        );
        assert_eq!(
            icon_url("03d", IconScale::Small),
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
    }
}
