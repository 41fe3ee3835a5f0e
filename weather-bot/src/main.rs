//! wbot binary: loads `.env`, parses the CLI, runs the bot until Ctrl-C.

use anyhow::Result;
use clap::Parser;
use weather_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, interval_ms } => {
            let config = load_config(token, interval_ms)?;
            run_bot(config).await
        }
    }
}
