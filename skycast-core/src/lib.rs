//! Core library for the `skycast` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client (current conditions + 3-hour forecast)
//! - Device location via IP geolocation
//! - The render state machine and the pure renderer
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod forecast;
pub mod geo;
pub mod model;
pub mod provider;
pub mod render;
pub mod state;

pub use config::Config;
pub use forecast::{DailyCard, daily_cards};
pub use geo::{Coordinates, GeoError, IpLookupSource, LocationSource};
pub use model::{CurrentConditions, ForecastEntry, LocationQuery, LookupError, WeatherReport};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use render::render;
pub use state::{Generation, RenderState, Session};
