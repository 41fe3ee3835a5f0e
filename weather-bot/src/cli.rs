//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "wbot")]
#[command(about = "Telegram weather bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; flags override env).
    Run {
        /// Overrides BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
        /// Overrides POLL_INTERVAL_MS.
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },
}

/// Loads BotConfig from env and applies CLI overrides.
pub fn load_config(token: Option<String>, interval_ms: Option<u64>) -> Result<BotConfig> {
    let mut config = BotConfig::load(token)?;
    if let Some(ms) = interval_ms {
        config.polling.interval_ms = ms;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_flags() {
        let cli = Cli::try_parse_from(["wbot", "run", "--token", "abc", "--interval-ms", "200"])
            .unwrap();
        match cli.command {
            Commands::Run { token, interval_ms } => {
                assert_eq!(token.as_deref(), Some("abc"));
                assert_eq!(interval_ms, Some(200));
            }
        }
    }

    #[test]
    fn test_parse_run_without_flags() {
        let cli = Cli::try_parse_from(["wbot", "run"]).unwrap();
        let Commands::Run { token, interval_ms } = cli.command;
        assert!(token.is_none());
        assert!(interval_ms.is_none());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["wbot"]).is_err());
    }
}
