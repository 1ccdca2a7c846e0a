use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::UpstreamError, model::ForecastQuery};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Raw upstream JSON, relayed to clients without re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBody(pub String);

impl UpstreamBody {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// A third-party forecast API sitting behind the proxy.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<UpstreamBody, UpstreamError>;
}
