mod error;
pub mod handlers;
mod types;

pub use error::ApiError;
pub use types::*;

use crate::{
    Result,
    config::Config,
    metrics::Metrics,
    upstream::HttpInferenceClient,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/analyze", post(handlers::predict))
        .route("/metrics", get(handlers::metrics))
        // Summarization inputs are routinely larger than axum's 2 MB default.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = HttpInferenceClient::new(&config.upstream)?;
    info!(
        "Forwarding inference requests to {} (timeout {}s)",
        client.url(),
        config.upstream.timeout_secs
    );

    let metrics = Metrics::new()?;
    let app_state = AppState::new(Arc::new(client), Arc::new(metrics));

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
