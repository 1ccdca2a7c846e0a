use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::ClientError,
    model::{ForecastQuery, ForecastResponse},
};

/// Dashboard-side client of the forecast proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<ForecastResponse, ClientError> {
        let url = format!("{}/weather", self.base_url);
        tracing::debug!(%url, %query, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&query.proxy_params())
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(ClientError::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
