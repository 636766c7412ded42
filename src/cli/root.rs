use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::ask::AskCommand;
use super::probe::{PingCommand, SanityCommand};
use crate::config::Config;
use crate::inference::{HttpInferenceClient, InferenceService};
use crate::tui;

/// Medi-Bot - ask medical questions from your terminal
#[derive(Parser, Debug)]
#[command(
    name = "medibot",
    version,
    about = "Ask medical questions from your terminal",
    long_about = r#"Medi-Bot is a terminal chat client for a medical question answering service.
Answers are generated by a language model and are not a substitute for professional advice.

Examples:
  medibot                                   # Start the interactive chat panel
  medibot ask "What causes a headache?"     # Ask a single question
  medibot --endpoint http://10.0.0.5:5000   # Use another inference service
  medibot ping                              # Check the service is up"#
)]
pub struct Cli {
    /// Inference service root URL
    #[arg(short = 'e', long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long = "timeout", global = true)]
    pub timeout: Option<u64>,

    /// Path to a JSON config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question non-interactively
    Ask(AskCommand),

    /// Check that the inference service is up
    Ping(PingCommand),

    /// Run the inference service's self-test question
    Sanity(SanityCommand),
}

impl Cli {
    /// Whether this invocation takes over the terminal
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// Command line flags take precedence over file and environment settings
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.base_url = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
    }

    pub async fn execute(self) -> Result<()> {
        let mut config = Config::init(self.config.as_deref()).await?;
        self.apply_overrides(&mut config);
        config.validate()?;
        debug!("Configuration initialized: {:?}", config);

        let client = HttpInferenceClient::new(config.client_config())?;

        match &self.command {
            Some(Commands::Ask(ask)) => ask.execute(&config, &client).await,
            Some(Commands::Ping(ping)) => ping.execute(&client).await,
            Some(Commands::Sanity(sanity)) => sanity.execute(&client).await,
            None => {
                info!("Starting interactive mode against {}", client.endpoint());
                let service: Arc<dyn InferenceService> = Arc::new(client);
                tui::run(&config, service).await?;
                info!("Application finished");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::parse_from(["medibot"]);
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_ask_with_global_flags() {
        let cli = Cli::parse_from([
            "medibot",
            "ask",
            "--json",
            "why",
            "cough?",
            "--endpoint",
            "http://10.0.0.5:5000",
            "-t",
            "5",
        ]);
        assert!(!cli.is_interactive());

        match &cli.command {
            Some(Commands::Ask(ask)) => {
                assert!(ask.json);
                assert_eq!(ask.question, vec!["why", "cough?"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_ping_and_sanity_parse() {
        assert!(matches!(
            Cli::parse_from(["medibot", "ping"]).command,
            Some(Commands::Ping(_))
        ));
        assert!(matches!(
            Cli::parse_from(["medibot", "sanity"]).command,
            Some(Commands::Sanity(_))
        ));
    }

    #[tokio::test]
    async fn test_config_layers_apply_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "base_url": "http://file.local:5000", "request_timeout_secs": 30, "title": "File Bot" }}"#
        )
        .unwrap();

        let mut config = Config::load_file(file.path()).await.unwrap();
        assert_eq!(config.base_url, "http://file.local:5000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.title, "File Bot");
        assert_eq!(config.query_path, "/query");

        let env: HashMap<&str, &str> = [
            ("MEDIBOT_BASE_URL", "http://env.local:5000"),
            ("MEDIBOT_TIMEOUT", "20"),
        ]
        .into_iter()
        .collect();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://env.local:5000");
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.title, "File Bot");

        let cli = Cli::parse_from(["medibot", "--endpoint", "http://cli.local:5000"]);
        cli.apply_overrides(&mut config);
        assert_eq!(config.base_url, "http://cli.local:5000");
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.title, "File Bot");
        assert!(config.validate().is_ok());
    }
}
