use super::types::ErrorResponse;
use crate::upstream::UpstreamError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures surfaced to HTTP clients; each maps to one status and JSON body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Missing 'text'")]
    Validation,

    #[error("Upstream AI service error: {details}")]
    UpstreamUnavailable { timed_out: bool, details: String },

    #[error("AI service failed with status {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("Server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::UpstreamUnavailable { .. } | Self::UpstreamRejected { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status recorded in `app_requests_total`; rejections carry the upstream's.
    pub fn metric_status(&self) -> u16 {
        match self {
            Self::UpstreamRejected { status, .. } => *status,
            other => other.status().as_u16(),
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::UpstreamRejected { .. }
        )
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::Validation => ErrorResponse::new("Missing 'text'"),
            Self::UpstreamUnavailable { details, .. } => {
                ErrorResponse::new("Upstream AI service error").with_details(details.clone())
            }
            Self::UpstreamRejected { status, body } => ErrorResponse {
                status_code: Some(*status),
                body: Some(body.clone()),
                ..ErrorResponse::new("AI service failed")
            },
            Self::Internal(details) => ErrorResponse::new("Server error").with_details(details.clone()),
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unavailable { timed_out, details } => {
                Self::UpstreamUnavailable { timed_out, details }
            }
            UpstreamError::Rejected { status, body } => Self::UpstreamRejected { status, body },
            UpstreamError::InvalidBody(details) => Self::Internal(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
