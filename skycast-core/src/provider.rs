use crate::model::{LocationQuery, LookupError, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Seam for the weather backend. The shipped implementation talks to
/// OpenWeatherMap; tests substitute their own.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions and the 3-hour forecast series for one query.
    ///
    /// Both underlying requests must succeed; a failure of either yields a
    /// single collapsed [`LookupError`] and no partial report.
    async fn lookup(&self, query: &LocationQuery) -> Result<WeatherReport, LookupError>;
}
