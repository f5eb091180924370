//! Device location, approximated from the machine's public IP.
//!
//! A one-shot operation with exactly two outcomes: coordinates, or a
//! failure carrying its reason.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://ip-api.com";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Shown to the user verbatim; the underlying cause is logged only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to retrieve your location")]
pub struct GeoError;

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeoError>;
}

/// Resolves coordinates from the caller's public IP via ip-api.com
/// (no API key required).
#[derive(Debug, Clone)]
pub struct IpLookupSource {
    base_url: String,
    http: Client,
}

impl IpLookupSource {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the source at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for IpLookupSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[async_trait]
impl LocationSource for IpLookupSource {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        let url = format!("{}/json", self.base_url);

        let outcome: Result<IpApiResponse, anyhow::Error> = async {
            let res = self.http.get(&url).send().await?;
            let status = res.status();
            if !status.is_success() {
                anyhow::bail!("ip-api request failed with status {status}");
            }
            Ok(res.json::<IpApiResponse>().await?)
        }
        .await;

        match outcome {
            Ok(parsed) if parsed.status == "success" => {
                let coords = Coordinates {
                    lat: parsed.lat,
                    lon: parsed.lon,
                };
                debug!(lat = coords.lat, lon = coords.lon, "resolved device location");
                Ok(coords)
            }
            Ok(parsed) => {
                warn!(status = %parsed.status, "ip-api rejected the location request");
                Err(GeoError)
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "device location lookup failed");
                Err(GeoError)
            }
        }
    }
}
