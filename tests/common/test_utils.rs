use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use inference_gateway::{
    config::UpstreamConfig,
    metrics::Metrics,
    server::{self, handlers::AppState},
    upstream::{HttpInferenceClient, InferenceClient},
};
use serde_json::Value;
use std::sync::Arc;

/// Build the full router around any client, returning the metrics handle too
pub fn create_test_app(client: Arc<dyn InferenceClient>) -> (Router, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new().unwrap());
    let app = server::router(AppState::new(client, metrics.clone()));
    (app, metrics)
}

/// Upstream configuration pointing at a mock server
pub fn upstream_config(url: String, timeout_secs: f64) -> UpstreamConfig {
    UpstreamConfig {
        api_url: url,
        api_token: None,
        timeout_secs,
    }
}

/// Build the router with a real HTTP client aimed at `url`
pub fn create_http_app(config: &UpstreamConfig) -> (Router, Arc<Metrics>) {
    let client = HttpInferenceClient::new(config).unwrap();
    create_test_app(Arc::new(client))
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
