//! Bot configuration: BaseConfig (Telegram + log) + polling, weather and conversation sections.
//! Everything is read from env (after `.env` is loaded) and passed down explicitly.

mod app;
mod base;
mod bot_config;


pub use app::{ConversationConfig, PollingConfig, WeatherConfig};
pub use base::BaseConfig;
pub use bot_config::BotConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Parses `key` if set, else returns `default`. A set but unparseable value is an error.
pub(crate) fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
