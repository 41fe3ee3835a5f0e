//! BotConfig: BaseConfig + polling, weather and conversation sections. Use load() for env-based loading.

use anyhow::Result;
use std::time::Duration;

use super::{BaseConfig, ConversationConfig, PollingConfig, WeatherConfig};
use crate::catalog::CityCatalog;

/// Full bot config. Load with BotConfig::load(), then validate() before init.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub polling: PollingConfig,
    pub weather: WeatherConfig,
    pub conversation: ConversationConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            polling: PollingConfig::from_env()?,
            weather: WeatherConfig::from_env()?,
            conversation: ConversationConfig::from_env()?,
        })
    }

    /// Validate every section. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.polling.validate()?;
        self.weather.validate()?;
        self.conversation.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn poll_interval(&self) -> Duration {
        self.polling.interval()
    }
    pub fn cities(&self) -> &CityCatalog {
        &self.conversation.cities
    }
}
