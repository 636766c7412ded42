//! Service trait for question answering backends

use async_trait::async_trait;

use super::errors::InferenceResult;

/// Anything that can answer a question with a block of text
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Ask a single question and get the generated answer
    async fn query(&self, question: &str) -> InferenceResult<String>;

    /// Human readable location of the service, shown in the status bar
    fn endpoint(&self) -> String;
}
