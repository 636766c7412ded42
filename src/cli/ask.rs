use anyhow::{anyhow, Result};
use clap::Args;
use std::io::{self, Read};
use tracing::{debug, info};

use crate::chat::{ChatPanel, ReplyDisposition};
use crate::config::Config;
use crate::inference::InferenceService;

/// Ask a single question non-interactively
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask. If not provided, it is read from stdin
    pub question: Vec<String>,

    /// Print the whole conversation turn as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &Config, service: &dyn InferenceService) -> Result<()> {
        let output = self.run(config, service).await?;
        println!("{}", output);
        Ok(())
    }

    /// Drive one turn of the chat panel and return what it displays
    pub async fn run(&self, config: &Config, service: &dyn InferenceService) -> Result<String> {
        debug!("Executing ask command");

        let question = self.get_question()?;

        let mut panel = ChatPanel::new(config.panel_text());
        let pending = panel
            .submit_question(&question)
            .ok_or_else(|| anyhow!("No question provided. Use arguments or pipe input via stdin."))?;

        info!("Asking: {}", pending.question.chars().take(50).collect::<String>());

        let result = service.query(&pending.question).await;
        let disposition = panel.apply_reply(pending.seq, result);

        let output = if self.json {
            serde_json::to_string_pretty(panel.turn())?
        } else {
            panel.render().bot.text
        };

        if disposition == ReplyDisposition::Failed {
            eprintln!("{}", output);
            return Err(anyhow!("The inference service at {} could not answer", service.endpoint()));
        }

        Ok(output)
    }

    fn get_question(&self) -> Result<String> {
        if !self.question.is_empty() {
            // Join all arguments into a single question
            Ok(self.question.join(" "))
        } else {
            debug!("Reading question from stdin");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{ClientConfig, HttpInferenceClient};
    use mockito::Matcher;
    use serde_json::json;

    fn ask(words: &[&str], json: bool) -> AskCommand {
        AskCommand {
            question: words.iter().map(|w| w.to_string()).collect(),
            json,
        }
    }

    #[tokio::test]
    async fn test_ask_joins_words_and_prints_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_body(Matcher::Json(json!({ "question": "What causes a headache?" })))
            .with_status(200)
            .with_body(r#"{"response":"Common causes include dehydration and stress."}"#)
            .expect(1)
            .create_async()
            .await;

        let client = HttpInferenceClient::new(ClientConfig {
            base_url: server.url(),
            ..ClientConfig::default()
        })
        .unwrap();

        let output = ask(&["What", "causes", "a", "headache?"], false)
            .run(&Config::default(), &client)
            .await
            .unwrap();

        assert_eq!(output, "Common causes include dehydration and stress.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ask_json_output() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/query")
            .with_status(200)
            .with_body(r#"{"response":"Rest."}"#)
            .create_async()
            .await;

        let client = HttpInferenceClient::new(ClientConfig {
            base_url: server.url(),
            ..ClientConfig::default()
        })
        .unwrap();

        let output = ask(&["tired?"], true).run(&Config::default(), &client).await.unwrap();
        let turn: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(turn["question_text"], "tired?");
        assert_eq!(turn["response_text"], "Rest.");
        assert_eq!(turn["status"], "idle");
        assert_eq!(turn["outcome"], "answered");
    }

    #[tokio::test]
    async fn test_ask_blank_question_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/query").expect(0).create_async().await;

        let client = HttpInferenceClient::new(ClientConfig {
            base_url: server.url(),
            ..ClientConfig::default()
        })
        .unwrap();

        let result = ask(&["  "], false).run(&Config::default(), &client).await;
        assert!(result.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ask_failure_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/query")
            .with_status(503)
            .create_async()
            .await;

        let client = HttpInferenceClient::new(ClientConfig {
            base_url: server.url(),
            ..ClientConfig::default()
        })
        .unwrap();

        assert!(ask(&["hello"], false).run(&Config::default(), &client).await.is_err());
    }
}
