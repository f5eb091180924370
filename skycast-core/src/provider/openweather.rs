use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{CurrentConditions, ForecastEntry, LocationQuery, LookupError, WeatherReport};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
        match query {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut params = Self::location_params(query);
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        debug!(endpoint, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather /{endpoint}"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather /{endpoint} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather /{} request failed with status {}: {}",
                endpoint,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather /{endpoint} JSON"))
    }

    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentConditions> {
        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;

        let condition = parsed.weather.into_iter().next().unwrap_or_default();

        Ok(CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country,
            fetched_at: Local::now(),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            description: condition.description,
            icon: condition.icon,
        })
    }

    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastEntry>> {
        let parsed: OwForecastResponse = self.get_json("forecast", query).await?;

        let entries = parsed
            .list
            .into_iter()
            .map(|entry| {
                let timestamp = DateTime::<Utc>::from_timestamp(entry.dt, 0)
                    .unwrap_or_else(Utc::now);
                let condition = entry.weather.into_iter().next().unwrap_or_default();

                ForecastEntry {
                    timestamp,
                    label: entry.dt_txt,
                    temperature_c: entry.main.temp,
                    description: condition.description,
                    icon: condition.icon,
                }
            })
            .collect();

        Ok(entries)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn lookup(&self, query: &LocationQuery) -> Result<WeatherReport, LookupError> {
        // Both requests fly at once; the first failure sinks the whole lookup.
        let joined = tokio::try_join!(self.fetch_current(query), self.fetch_forecast(query));

        match joined {
            Ok((current, entries)) => Ok(WeatherReport { current, entries }),
            Err(err) => {
                warn!(?query, error = %format!("{err:#}"), "weather lookup failed");
                Err(LookupError::for_query(query))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct OwWeather {
    description: String,
    icon: String,
}

impl Default for OwWeather {
    fn default() -> Self {
        Self {
            description: "Unknown".to_string(),
            icon: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_params() {
        let q = LocationQuery::city("London").unwrap();
        let params = OpenWeatherClient::location_params(&q);
        assert_eq!(params, vec![("q", "London".to_string())]);
    }

    #[test]
    fn coordinate_query_params() {
        let q = LocationQuery::coordinates(51.5, -0.12);
        let params = OpenWeatherClient::location_params(&q);
        assert_eq!(
            params,
            vec![("lat", "51.5".to_string()), ("lon", "-0.12".to_string())]
        );
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert!(truncated.len() < body.len());
        assert!(truncated.ends_with("..."));
    }
}
