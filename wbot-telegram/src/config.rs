//! Minimal Telegram config: token, optional Bot API URL, getUpdates long-poll timeout.
//! Loaded from env: BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), TELEGRAM_POLL_TIMEOUT_SECS.

use anyhow::{Context, Result};
use std::env;

/// HTTP timeout of the client built by `teloxide::Bot::new`. A getUpdates long poll must end before it.
pub const CLIENT_TIMEOUT_SECS: u32 = 17;

/// Connectivity settings for the Telegram transport.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// Long-poll timeout passed to getUpdates; 0 means short polling.
    pub poll_timeout_secs: u32,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN required; TELEGRAM_API_URL and TELEGRAM_POLL_TIMEOUT_SECS optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let poll_timeout_secs = match env::var("TELEGRAM_POLL_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("TELEGRAM_POLL_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => 0,
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            poll_timeout_secs,
        })
    }

    /// Builds config with the given token; no custom API URL, short polling.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            poll_timeout_secs: 0,
        }
    }

    /// Creates the teloxide Bot, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .with_context(|| format!("Invalid Telegram API URL: {}", url))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
