//! Wiring: config → Telegram source, weather client, state machine, store, dispatcher, poll loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use wbot_core::{init_tracing, UpdateSource, WeatherLookup};
use wbot_telegram::{TelegramConfig, TelegramUpdateSource};
use weather_client::{mask_token, OpenWeatherClient};

use crate::config::BotConfig;
use crate::conversation::ConversationMachine;
use crate::dispatcher::Dispatcher;
use crate::poll_loop::PollLoop;
use crate::store::ConversationStore;

/// Telegram transport settings derived from the bot config.
pub fn telegram_config(config: &BotConfig) -> TelegramConfig {
    TelegramConfig {
        bot_token: config.base.bot_token.clone(),
        telegram_api_url: config.base.telegram_api_url.clone(),
        poll_timeout_secs: config.polling.telegram_timeout_secs,
    }
}

/// OpenWeatherMap client bounded by the configured lookup timeout.
pub fn build_weather_client(config: &BotConfig) -> Result<OpenWeatherClient> {
    OpenWeatherClient::with_base_url(
        config.weather.api_key.clone(),
        config.weather.api_url.clone(),
        config.weather.lookup_timeout(),
    )
    .context("Failed to build weather client")
}

/// Builds the poll loop around an existing source and lookup (tests inject fakes here).
pub fn build_poll_loop(
    config: &BotConfig,
    source: Arc<dyn UpdateSource>,
    lookup: Arc<dyn WeatherLookup>,
) -> PollLoop {
    let machine = ConversationMachine::new(
        config.conversation.cities.clone(),
        lookup,
        config.weather.lookup_timeout(),
    );
    let store = ConversationStore::new(config.conversation.capacity);
    let dispatcher = Dispatcher::new(machine, store, source.clone());
    PollLoop::new(source, dispatcher, config.poll_interval())
}

/// Token cancelled on the first Ctrl-C (SIGINT).
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("SIGINT received, stopping"),
            Err(e) => error!(error = %e, "Failed to listen for SIGINT, stopping"),
        }
        token.cancel();
    });
    cancel
}

/// Main entry: validate config, init logging, build components, poll until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        cities = config.cities().len(),
        interval_ms = config.polling.interval_ms,
        capacity = config.conversation.capacity,
        owm_api_key = %mask_token(&config.weather.api_key),
        "Initializing bot"
    );

    let bot = telegram_config(&config).build_bot()?;
    let source: Arc<dyn UpdateSource> = Arc::new(TelegramUpdateSource::new(
        bot,
        config.polling.telegram_timeout_secs,
    ));
    let lookup: Arc<dyn WeatherLookup> = Arc::new(build_weather_client(&config)?);
    let poll_loop = build_poll_loop(&config, source, lookup);

    info!("Bot started successfully");
    poll_loop.run(cancel_on_ctrl_c()).await;
    info!("Bye bye");

    Ok(())
}
