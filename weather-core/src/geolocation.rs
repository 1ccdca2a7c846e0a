//! Where is the user? IP-based lookup, or coordinates given up front.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::GeolocationError;

pub const IP_API_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub place: Option<String>,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Location, GeolocationError>;
}

/// Always answers with the same coordinates.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Location);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Location, GeolocationError> {
        Ok(self.0.clone())
    }
}

/// Approximate location from the public IP address via ip-api.com.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl IpGeolocator {
    pub fn new() -> Result<Self, GeolocationError> {
        Self::with_url(IP_API_URL.to_string())
    }

    pub fn with_url(url: String) -> Result<Self, GeolocationError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { url, http })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Location, GeolocationError> {
        let response = self.http.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(GeolocationError::Unavailable(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response.json().await?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| "lookup failed".to_string());
            tracing::debug!("IP geolocation refused: {}", reason);
            return Err(GeolocationError::Unavailable(reason));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::info!("Located near {:?}", body.city);
                Ok(Location {
                    latitude,
                    longitude,
                    place: body.city,
                })
            }
            _ => Err(GeolocationError::Unavailable(
                "lookup returned no coordinates".to_string(),
            )),
        }
    }
}
