use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::inference::HttpInferenceClient;

/// Check that the inference service is reachable
#[derive(Args, Debug)]
pub struct PingCommand {}

impl PingCommand {
    pub async fn execute(&self, client: &HttpInferenceClient) -> Result<()> {
        debug!("Executing ping command");

        let greeting = client
            .ping()
            .await
            .with_context(|| format!("Inference service at {} is not reachable", client.config().base_url))?;

        println!("{} is up: {}", client.config().base_url, greeting);
        Ok(())
    }
}

/// Ask the inference service its built-in self-test question
#[derive(Args, Debug)]
pub struct SanityCommand {}

impl SanityCommand {
    pub async fn execute(&self, client: &HttpInferenceClient) -> Result<()> {
        debug!("Executing sanity command");

        let sanity = client
            .sanity()
            .await
            .with_context(|| format!("Sanity check against {} failed", client.config().base_url))?;

        println!("Q: {}", sanity.question);
        println!("A: {}", sanity.response);
        Ok(())
    }
}
