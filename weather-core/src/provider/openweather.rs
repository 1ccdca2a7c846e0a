use async_trait::async_trait;
use reqwest::Client;

use crate::{error::UpstreamError, model::ForecastQuery};

use super::{ForecastProvider, UpstreamBody};

pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// OpenWeather 5-day / 3-hour forecast, always in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_FORECAST_URL.to_string())
    }

    pub fn with_url(api_key: String, url: String) -> Self {
        Self {
            api_key,
            url,
            http: Client::new(),
        }
    }

    /// Outbound query: key and units, then either `lat`/`lon` or `q`.
    pub fn outbound_params<'a>(&'a self, query: &'a ForecastQuery) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("appid", self.api_key.as_str()), ("units", "metric")];
        match query {
            ForecastQuery::Coordinates { lat, lon } => {
                params.push(("lat", lat.as_str()));
                params.push(("lon", lon.as_str()));
            }
            ForecastQuery::City(city) => params.push(("q", city.as_str())),
        }
        params
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<UpstreamBody, UpstreamError> {
        let res = self
            .http
            .get(&self.url)
            .query(&self.outbound_params(query))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(UpstreamBody(body))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
