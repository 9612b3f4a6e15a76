use serde::Serialize;
use thiserror::Error;

/// Body sent to the inference provider.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamPayload<'a> {
    pub inputs: &'a str,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// The provider could not be reached or did not answer in time.
    #[error("upstream unavailable: {details}")]
    Unavailable { timed_out: bool, details: String },

    /// The provider answered with a status >= 400.
    #[error("upstream returned status {status}")]
    Rejected { status: u16, body: String },

    /// The provider answered successfully with a body that is not JSON.
    #[error("upstream returned an invalid body: {0}")]
    InvalidBody(String),
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Unavailable { timed_out: true, .. })
    }
}
