use super::types::{UpstreamError, UpstreamPayload};
use crate::{Result, config::UpstreamConfig};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Performs exactly one upstream round trip for `text`.
    async fn infer(&self, text: &str) -> std::result::Result<Value, UpstreamError>;
}

pub struct HttpInferenceClient {
    client: reqwest::Client,
    url: String,
}

impl HttpInferenceClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        if config.timeout_secs <= 0.0 {
            return Err(crate::Error::config(format!(
                "Upstream timeout must be positive, got {}",
                config.timeout_secs
            )));
        }
        let timeout = Duration::try_from_secs_f64(config.timeout_secs).map_err(|e| {
            crate::Error::config(format!(
                "Invalid upstream timeout {}: {}",
                config.timeout_secs, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        if let Some(token) = config.bearer_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| crate::Error::config(format!("Invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn infer(&self, text: &str) -> std::result::Result<Value, UpstreamError> {
        debug!("Forwarding {} bytes of text to {}", text.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&UpstreamPayload { inputs: text })
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable {
                timed_out: e.is_timeout(),
                details: e.to_string(),
            })?;

        let status = response.status();
        // The body is part of the round trip; a stall here is still the provider's fault.
        let body = response.text().await.map_err(|e| UpstreamError::Unavailable {
            timed_out: e.is_timeout(),
            details: e.to_string(),
        })?;

        debug!("Upstream answered with status {}", status);

        if status.as_u16() >= 400 {
            return Err(UpstreamError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
    }
}
