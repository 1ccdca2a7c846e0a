//! Route tests for the forecast proxy, driving the router in-process.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use tower::ServiceExt;
use weather_core::{ForecastProvider, ForecastQuery, UpstreamBody, UpstreamError};
use weather_proxy::{AppState, config::Config, router};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every query and answers with a canned result.
#[derive(Debug)]
struct RecordingProvider {
    calls: Mutex<Vec<ForecastQuery>>,
    fail_with: Option<u16>,
}

impl RecordingProvider {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(status),
        })
    }

    fn calls(&self) -> Vec<ForecastQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForecastProvider for RecordingProvider {
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<UpstreamBody, UpstreamError> {
        self.calls.lock().unwrap().push(query.clone());
        match self.fail_with {
            Some(status) => Err(UpstreamError::Status {
                status,
                body: "upstream said no".into(),
            }),
            None => Ok(UpstreamBody(r#"{"city":{"name":"Test"},"list":[]}"#.into())),
        }
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, content_type, json)
}

#[tokio::test]
async fn missing_location_is_rejected_before_upstream() {
    let provider = RecordingProvider::ok();
    let app = router(AppState::new(provider.clone()));

    let (status, _, body) = get(app, "/weather").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "City or coordinates are required");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn blank_city_is_rejected() {
    let provider = RecordingProvider::ok();
    let app = router(AppState::new(provider.clone()));

    let (status, _, _) = get(app, "/weather?city=&lat=12").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn malformed_query_gets_error_envelope() {
    let provider = RecordingProvider::ok();
    let app = router(AppState::new(provider.clone()));

    let (status, content_type, body) = get(app, "/weather?city=a&city=b").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert!(body["error"].is_string());
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn city_request_is_forwarded_as_city() {
    let provider = RecordingProvider::ok();
    let app = router(AppState::new(provider.clone()));

    let (status, content_type, body) = get(app, "/weather?city=Cairo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["city"]["name"], "Test");
    assert_eq!(provider.calls(), vec![ForecastQuery::City("Cairo".into())]);
}

#[tokio::test]
async fn legacy_api_path_is_served() {
    let provider = RecordingProvider::ok();
    let app = router(AppState::new(provider.clone()));

    let (status, _, _) = get(app, "/api/weather?lat=10.5&lon=-20.25").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        provider.calls(),
        vec![ForecastQuery::Coordinates {
            lat: "10.5".into(),
            lon: "-20.25".into()
        }]
    );
}

#[tokio::test]
async fn upstream_status_is_relayed_with_envelope() {
    let provider = RecordingProvider::failing(404);
    let app = router(AppState::new(provider));

    let (status, _, body) = get(app, "/weather?city=Atlantis").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "Error fetching weather data" }));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router(AppState::new(RecordingProvider::ok()));

    let (status, _, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn cross_origin_get_is_allowed() {
    let app = router(AppState::new(RecordingProvider::ok()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/weather?city=Cairo")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn preflight_lists_allowed_headers() {
    let provider = RecordingProvider::ok();
    let app = router(AppState::new(provider.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/weather")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(
                    header::ACCESS_CONTROL_REQUEST_HEADERS,
                    "x-requested-with,content-type",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["origin", "x-requested-with", "content-type", "accept"] {
        assert!(allowed.contains(name), "{name} missing from {allowed}");
    }
    assert!(provider.calls().is_empty());
}

fn state_for(upstream: &MockServer) -> AppState {
    let config = Config::from_lookup(|key| match key {
        "WEATHER_API_KEY" => Some("SECRET".to_string()),
        "WEATHER_API_URL" => Some(upstream.uri()),
        _ => None,
    })
    .unwrap();
    AppState::from_config(&config)
}

#[tokio::test]
async fn end_to_end_city_query_uses_q_and_hides_key() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "Reykjavik"))
        .and(query_param("appid", "SECRET"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"cod":"200","list":[]}"#))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, _, body) = get(router(state_for(&upstream)), "/weather?city=Reykjavik").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cod"], "200");

    let requests = upstream.received_requests().await.unwrap();
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "lat" || k == "lon"));
}

#[tokio::test]
async fn end_to_end_coordinates_win_over_city() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("lat", "64.13"))
        .and(query_param("lon", "-21.9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, _, _) = get(
        router(state_for(&upstream)),
        "/weather?city=Reykjavik&lat=64.13&lon=-21.9",
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let requests = upstream.received_requests().await.unwrap();
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "q"));
}

#[tokio::test]
async fn end_to_end_missing_location_makes_no_outbound_call() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let (status, _, _) = get(router(state_for(&upstream)), "/weather?lon=5").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn end_to_end_unauthorized_upstream_is_relayed() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "cod": 401, "message": "Invalid API key" })),
        )
        .mount(&upstream)
        .await;

    let (status, _, body) = get(router(state_for(&upstream)), "/weather?city=Paris").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Error fetching weather data");
}

#[tokio::test]
async fn unreachable_upstream_is_a_500() {
    let config = Config::from_lookup(|key| match key {
        "WEATHER_API_URL" => Some("http://127.0.0.1:1/forecast".to_string()),
        _ => None,
    })
    .unwrap();

    let (status, _, body) = get(router(AppState::from_config(&config)), "/weather?city=Paris").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching weather data");
}
