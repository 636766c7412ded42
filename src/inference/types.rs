//! Wire types exchanged with the inference service

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `POST /query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Body returned by `POST /query` and `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

/// Body returned by `GET /sanity`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SanityResponse {
    pub question: String,
    pub response: String,
}

/// Connection settings for an inference client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `http://127.0.0.1:5000`
    pub base_url: String,

    /// Path of the question route
    pub query_path: String,

    /// Upper bound for a single request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            query_path: "/query".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_body_shape() {
        let body = serde_json::to_value(QueryRequest::new("What causes a headache?")).unwrap();
        assert_eq!(body, serde_json::json!({ "question": "What causes a headache?" }));
    }

    #[test]
    fn test_query_response_requires_response_field() {
        let ok: QueryResponse = serde_json::from_str(r#"{"response":"R"}"#).unwrap();
        assert_eq!(ok.response, "R");

        assert!(serde_json::from_str::<QueryResponse>(r#"{"answer":"R"}"#).is_err());
        assert!(serde_json::from_str::<QueryResponse>(r#"{"response":null}"#).is_err());
    }
}
