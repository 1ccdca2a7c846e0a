use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use weather_core::ForecastQuery;

use crate::AppState;

const UPSTREAM_FAILURE: &str = "Error fetching weather data";

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::warn!("Malformed forecast request: {message}");
            return error_response(StatusCode::BAD_REQUEST, &message);
        }
    };

    let query = match ForecastQuery::from_params(
        params.city.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    ) {
        Ok(query) => query,
        Err(e) => {
            tracing::warn!("Rejected forecast request: {e}");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    match state.provider.fetch_forecast(&query).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body.into_string(),
        )
            .into_response(),
        Err(e) => {
            let status = e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::error!(%query, %status, "{UPSTREAM_FAILURE}: {e}");
            error_response(status, UPSTREAM_FAILURE)
        }
    }
}
