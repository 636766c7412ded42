//! Error types for the inference service client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Inference service returned {status}: {body}")]
    StatusError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out after {0} seconds")]
    TimeoutError(u64),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl InferenceError {
    /// Whether the request failed before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            InferenceError::HttpError(_) | InferenceError::TimeoutError(_)
        )
    }
}

impl From<serde_json::Error> for InferenceError {
    fn from(err: serde_json::Error) -> Self {
        InferenceError::MalformedResponse(err.to_string())
    }
}

pub type InferenceResult<T> = Result<T, InferenceError>;
