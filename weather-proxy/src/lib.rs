//! Forecast proxy: forwards dashboard requests to the upstream forecast API
//! with the server-held key, relaying the JSON or a `{error}` envelope.

pub mod config;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use weather_core::{ForecastProvider, OpenWeatherProvider};

use config::Config;

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ForecastProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = OpenWeatherProvider::with_url(
            config.weather_api_key.clone(),
            config.weather_api_url.clone(),
        );
        Self::new(Arc::new(provider))
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_origin(AllowOrigin::any());

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/weather", get(routes::weather::get_weather))
        .route("/api/weather", get(routes::weather::get_weather))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
