use std::env;

use weather_core::provider::openweather::DEFAULT_FORECAST_URL;

#[derive(Debug, Clone)]
pub struct Config {
    /// Provider key. Not validated here; a missing key surfaces as upstream 401s.
    pub weather_api_key: String,
    pub weather_api_url: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|s| !s.is_empty());

        let weather_api_key = var("WEATHER_API_KEY").unwrap_or_default();
        if weather_api_key.is_empty() {
            tracing::warn!("WEATHER_API_KEY is not set; upstream requests will be rejected");
        }

        Ok(Self {
            weather_api_key,
            weather_api_url: var("WEATHER_API_URL").unwrap_or_else(|| DEFAULT_FORECAST_URL.into()),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT").unwrap_or_else(|| "3000".into()).parse()?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
