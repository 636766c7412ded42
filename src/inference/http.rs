use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    errors::{InferenceError, InferenceResult},
    service::InferenceService,
    types::{ClientConfig, QueryRequest, QueryResponse, SanityResponse},
};

/// HTTP client for the inference service
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    client: Client,
    config: ClientConfig,
}

impl HttpInferenceClient {
    /// Create a new client from connection settings
    pub fn new(config: ClientConfig) -> InferenceResult<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            InferenceError::ConfigError(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        if !config.query_path.starts_with('/') {
            return Err(InferenceError::ConfigError(format!(
                "query path must start with '/' (got '{}')",
                config.query_path
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_transport(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::TimeoutError(self.config.timeout.as_secs())
        } else {
            InferenceError::HttpError(err)
        }
    }

    /// Send a request and decode a JSON body, folding every failure into `InferenceError`
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> InferenceResult<T> {
        let response = request.send().await.map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Inference service returned {}", status);
            return Err(InferenceError::StatusError { status, body });
        }

        let text = response.text().await.map_err(|e| self.map_transport(e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Hit the service root, which answers with a fixed greeting when it is up
    pub async fn ping(&self) -> InferenceResult<String> {
        let url = self.url("/");
        debug!("Pinging inference service at {}", url);

        let body: QueryResponse = self.send_json(self.client.get(&url)).await?;
        Ok(body.response)
    }

    /// Run the service's built-in self test question
    pub async fn sanity(&self) -> InferenceResult<SanityResponse> {
        let url = self.url("/sanity");
        debug!("Running sanity check against {}", url);

        self.send_json(self.client.get(&url)).await
    }
}

#[async_trait]
impl InferenceService for HttpInferenceClient {
    async fn query(&self, question: &str) -> InferenceResult<String> {
        let url = self.url(&self.config.query_path);
        debug!("Sending question to {}", url);

        let request = self.client.post(&url).json(&QueryRequest::new(question));
        let body: QueryResponse = self.send_json(request).await?;

        debug!("Received {} byte response", body.response.len());
        Ok(body.response)
    }

    fn endpoint(&self) -> String {
        self.url(&self.config.query_path)
    }
}
