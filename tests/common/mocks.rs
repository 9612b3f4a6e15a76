use async_trait::async_trait;
use inference_gateway::upstream::{InferenceClient, UpstreamError};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock inference client returning a fixed outcome and recording the texts it saw
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    pub outcome: std::result::Result<Value, UpstreamError>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockInferenceClient {
    pub fn returning(result: Value) -> Self {
        Self {
            outcome: Ok(result),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: UpstreamError) -> Self {
        Self {
            outcome: Err(error),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn infer(&self, text: &str) -> std::result::Result<Value, UpstreamError> {
        self.requests.lock().unwrap().push(text.to_string());
        self.outcome.clone()
    }
}
