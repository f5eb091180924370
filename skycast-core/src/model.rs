use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the user asked to look up: a city by name, or a point on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Build a city query, rejecting empty input before any request is made.
    pub fn city(input: &str) -> Result<Self, LookupError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LookupError::EmptyCity);
        }
        Ok(LocationQuery::City(trimmed.to_string()))
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        LocationQuery::Coordinates { lat, lon }
    }
}

/// Current conditions for one location, as of one fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub fetched_at: DateTime<Local>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub description: String,
    pub icon: String,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    /// Provider's local-time label, e.g. "2026-08-30 12:00:00".
    pub label: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon: String,
}

/// The payload of one successful lookup: current conditions plus the raw
/// 3-hour forecast series. Replaced wholesale by the next lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub entries: Vec<ForecastEntry>,
}

/// User-facing lookup failures. Request failures are deliberately collapsed:
/// the banner never says which of the two requests failed, or why. Details
/// go to the log instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a city name")]
    EmptyCity,

    #[error("City not found. Please try again.")]
    CityNotFound,

    #[error("Unable to fetch weather data")]
    Fetch,
}

impl LookupError {
    /// The collapsed failure for a given query kind.
    pub fn for_query(query: &LocationQuery) -> Self {
        match query {
            LocationQuery::City(_) => LookupError::CityNotFound,
            LocationQuery::Coordinates { .. } => LookupError::Fetch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_trims_input() {
        let q = LocationQuery::city("  Kyiv ").expect("non-empty city");
        assert_eq!(q, LocationQuery::City("Kyiv".to_string()));
    }

    #[test]
    fn empty_city_rejected() {
        assert_eq!(LocationQuery::city("").unwrap_err(), LookupError::EmptyCity);
        assert_eq!(LocationQuery::city("   ").unwrap_err(), LookupError::EmptyCity);
    }

    #[test]
    fn collapsed_error_depends_on_query_kind() {
        let city = LocationQuery::city("London").unwrap();
        assert_eq!(LookupError::for_query(&city), LookupError::CityNotFound);

        let coords = LocationQuery::coordinates(51.5, -0.12);
        assert_eq!(LookupError::for_query(&coords), LookupError::Fetch);
    }
}
