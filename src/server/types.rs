use super::error::ApiError;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_TASK: &str = "summarization";

/// A validated predict request.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub text: String,
    pub task: String,
}

impl InferenceRequest {
    /// Parses a raw request body.
    ///
    /// Bodies that are not JSON at all are an internal error; a JSON `null`
    /// is treated like an empty object.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ApiError::Internal(e.to_string()))?;

        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => Default::default(),
            _ => return Err(ApiError::Validation),
        };

        let text = fields
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .ok_or(ApiError::Validation)?;

        let task = fields
            .get("task")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TASK);

        Ok(Self {
            text: text.to_string(),
            task: task.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct InferenceResponse {
    pub result: Value,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            status_code: None,
            body: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
