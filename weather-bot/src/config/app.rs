//! Application sections: polling cadence, weather provider, conversations.

use anyhow::Result;
use std::env;
use std::time::Duration;
use wbot_telegram::CLIENT_TIMEOUT_SECS;

use super::env_or;
use crate::catalog::CityCatalog;
use crate::conversation::COMMAND_MARKER;
use crate::poll_loop::DEFAULT_POLL_INTERVAL;
use crate::store::DEFAULT_CAPACITY;

/// Poll loop cadence and getUpdates long-poll timeout.
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// POLL_INTERVAL_MS, sub-second.
    pub interval_ms: u64,
    /// TELEGRAM_POLL_TIMEOUT_SECS; 0 is short polling.
    pub telegram_timeout_secs: u32,
}

impl PollingConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            interval_ms: env_or(
                "POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL.as_millis() as u64,
            )?,
            telegram_timeout_secs: env_or("TELEGRAM_POLL_TIMEOUT_SECS", 0)?,
        })
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 || self.interval_ms >= 1000 {
            anyhow::bail!(
                "POLL_INTERVAL_MS must be between 1 and 999, got {}",
                self.interval_ms
            );
        }
        if self.telegram_timeout_secs >= CLIENT_TIMEOUT_SECS {
            anyhow::bail!(
                "TELEGRAM_POLL_TIMEOUT_SECS must be below the {}s Telegram client timeout, got {}",
                CLIENT_TIMEOUT_SECS,
                self.telegram_timeout_secs
            );
        }
        Ok(())
    }
}

/// OpenWeatherMap access.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// OWM_API_KEY
    pub api_key: String,
    /// OWM_API_URL
    pub api_url: String,
    /// WEATHER_LOOKUP_TIMEOUT_SECS
    pub lookup_timeout_secs: u64,
}

impl WeatherConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("OWM_API_KEY").unwrap_or_default(),
            api_url: env::var("OWM_API_URL")
                .unwrap_or_else(|_| weather_client::DEFAULT_BASE_URL.to_string()),
            lookup_timeout_secs: env_or("WEATHER_LOOKUP_TIMEOUT_SECS", 10)?,
        })
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("OWM_API_KEY is required. Set it in .env or environment.");
        }
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("OWM_API_URL is not a valid URL: {}", self.api_url);
        }
        if self.lookup_timeout_secs == 0 {
            anyhow::bail!("WEATHER_LOOKUP_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}

/// City catalog and conversation store bound.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// CITIES, comma-separated.
    pub cities: CityCatalog,
    /// CONVERSATION_CAPACITY
    pub capacity: usize,
}

impl ConversationConfig {
    pub fn from_env() -> Result<Self> {
        let cities = env::var("CITIES")
            .map(|s| CityCatalog::parse(&s))
            .unwrap_or_default();
        Ok(Self {
            cities,
            capacity: env_or("CONVERSATION_CAPACITY", DEFAULT_CAPACITY)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.cities.is_empty() {
            anyhow::bail!("CITIES must name at least one city");
        }
        if let Some(city) = self.cities.iter().find(|c| c.starts_with(COMMAND_MARKER)) {
            anyhow::bail!("CITIES entry looks like a command: {}", city);
        }
        if self.capacity == 0 {
            anyhow::bail!("CONVERSATION_CAPACITY must be greater than 0");
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            cities: CityCatalog::default(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}
