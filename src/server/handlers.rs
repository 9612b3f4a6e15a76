use super::{
    error::ApiError,
    types::{HealthResponse, InferenceRequest, InferenceResponse, RootResponse},
};
use crate::{metrics::Metrics, upstream::InferenceClient};
use axum::{
    body::Bytes,
    extract::{MatchedPath, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::{sync::Arc, time::Instant};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn InferenceClient>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(client: Arc<dyn InferenceClient>, metrics: Arc<Metrics>) -> Self {
        Self { client, metrics }
    }
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    state.metrics.record_request("/", "GET", 200);
    Json(RootResponse {
        message: "AI App is running!",
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    state.metrics.record_request("/healthz", "GET", 200);
    Json(HealthResponse { status: "ok" })
}

pub async fn predict(
    State(state): State<AppState>,
    path: MatchedPath,
    body: Bytes,
) -> Result<Json<InferenceResponse>, ApiError> {
    let start = Instant::now();
    let endpoint = path.as_str().to_string();
    let span = info_span!("predict", request_id = %Uuid::new_v4(), endpoint = %endpoint);

    async move {
        let outcome = forward(&state, &body, start).await;

        match &outcome {
            Ok(_) => {
                state
                    .metrics
                    .observe_request_latency(&endpoint, start.elapsed());
                state
                    .metrics
                    .record_request(&endpoint, "POST", StatusCode::OK.as_u16());
            }
            Err(err) => {
                if err.is_upstream() {
                    state.metrics.record_inference_error();
                }
                state
                    .metrics
                    .record_request(&endpoint, "POST", err.metric_status());
            }
        }

        outcome
    }
    .instrument(span)
    .await
}

async fn forward(
    state: &AppState,
    body: &[u8],
    start: Instant,
) -> Result<Json<InferenceResponse>, ApiError> {
    let request = InferenceRequest::from_json(body).inspect_err(|err| match err {
        ApiError::Validation => warn!("Rejected request without text"),
        other => error!("Failed to parse request body: {}", other),
    })?;

    info!(
        task = %request.task,
        "Received inference request with {} characters",
        request.text.chars().count()
    );

    let upstream_start = Instant::now();
    let outcome = state.client.infer(&request.text).await;
    // Only round trips that produced a response count towards inference latency.
    if !matches!(
        outcome,
        Err(crate::upstream::UpstreamError::Unavailable { .. })
    ) {
        state
            .metrics
            .observe_inference_latency(upstream_start.elapsed());
    }

    let result = outcome.map_err(|err| {
        error!("Inference failed: {}", err);
        ApiError::from(err)
    })?;

    let elapsed_seconds = start.elapsed().as_secs_f64();
    info!("Inference succeeded in {:.3}s", elapsed_seconds);

    Ok(Json(InferenceResponse {
        result,
        elapsed_seconds,
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(text) => ([(header::CONTENT_TYPE, crate::metrics::CONTENT_TYPE)], text).into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            ApiError::Internal(e.to_string()).into_response()
        }
    }
}
